use super::*;

use crate::text::measure::BuiltinMeasurer;

fn request(month: u32, day: u32, label: &str) -> CellRequest {
    CellRequest::new(month, day, label, 159, 160, false).unwrap()
}

#[test]
fn regular_day_places_date_and_weekday() {
    let cfg = CalendarConfig::default();
    let plan = CellPlan::build(&request(5, 28, "THU"), &cfg, &mut BuiltinMeasurer::new(1), 1).unwrap();
    assert_eq!(plan.texts.len(), 2);

    let date = plan.text(LabelRole::Date).unwrap();
    assert_eq!(date.text, "28");
    assert!(date.font.is_builtin());
    let r = date.ink_rect();
    let b = plan.layout.date_text_box;
    assert!(r.x0 >= b.x0 && r.x1 <= b.x1 && r.y0 >= b.y0 && r.y1 <= b.y1);
    assert!((r.center().x - b.center().x).abs() <= 1.0);

    let wd = plan.text(LabelRole::Weekday).unwrap();
    assert_eq!(wd.color, cfg.colors.weekday_text);
    let c = wd.ink_rect().center();
    assert!((c.x - plan.layout.weekday_anchor.x).abs() <= 1.0);
    assert!((c.y - plan.layout.weekday_anchor.y).abs() <= 1.0);
}

#[test]
fn first_day_adds_month_banner_at_margin() {
    let cfg = CalendarConfig::default();
    let plan = CellPlan::build(&request(1, 1, "THU"), &cfg, &mut BuiltinMeasurer::new(1), 1).unwrap();
    let roles: Vec<_> = plan.texts.iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![LabelRole::Date, LabelRole::MonthNumber, LabelRole::MonthName, LabelRole::Weekday]
    );

    let num = plan.text(LabelRole::MonthNumber).unwrap();
    assert_eq!(num.text, "01");
    assert_eq!(num.font.stroke_px, 2);
    assert_eq!(num.ink_rect().x0, 6.0);
    assert_eq!(num.ink_rect().y0, 6.0);

    let name = plan.text(LabelRole::MonthName).unwrap();
    assert_eq!(name.text, "January");
    assert_eq!(name.font.stroke_px, 1);
    assert_eq!(name.ink_rect().x0, 6.0);
    assert_eq!(name.ink_rect().y0, 6.0 + 34.0);
}

#[test]
fn strokes_follow_the_supersample_factor() {
    let cfg = CalendarConfig::default();
    let req = request(7, 1, "TUE").scaled(4).unwrap();
    let plan = CellPlan::build(&req, &cfg, &mut BuiltinMeasurer::new(4), 4).unwrap();
    assert_eq!(plan.text(LabelRole::MonthNumber).unwrap().font.stroke_px, 8);
    assert_eq!(plan.text(LabelRole::MonthName).unwrap().font.stroke_px, 4);
}

#[test]
fn invalid_request_keeps_only_the_triangle() {
    let cfg = CalendarConfig::default();
    for req in [request(2, 30, ""), request(13, 1, "MON"), request(1, 0, "MON")] {
        let plan = CellPlan::build(&req, &cfg, &mut BuiltinMeasurer::new(1), 1).unwrap();
        assert!(plan.texts.is_empty());
        assert_eq!(plan.triangle_color, cfg.colors.triangle);
    }
}
