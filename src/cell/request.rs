use crate::foundation::error::{CalError, CalResult};

/// Largest accepted cell edge in pixels.
pub const MAX_CELL_DIM: u32 = 8_192;

/// Everything needed to draw one day cell.
///
/// Month, day and label are not cross-checked against a calendar here; out-of-range values
/// draw a label-free placeholder. Pixel sizes are checked on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRequest {
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month, `1..=31`.
    pub day: u32,
    /// Weekday label drawn over the triangle.
    pub weekday_label: String,
    /// Cell width in pixels.
    pub cell_width_px: u32,
    /// Cell height in pixels.
    pub cell_height_px: u32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
}

impl CellRequest {
    /// Build a request, rejecting zero or oversized pixel dimensions.
    pub fn new(
        month: u32,
        day: u32,
        weekday_label: impl Into<String>,
        cell_width_px: u32,
        cell_height_px: u32,
        is_weekend: bool,
    ) -> CalResult<Self> {
        let req = Self {
            month,
            day,
            weekday_label: weekday_label.into(),
            cell_width_px,
            cell_height_px,
            is_weekend,
        };
        req.check_dims()?;
        Ok(req)
    }

    /// Check the pixel size; fields are public, so backends re-run this.
    pub fn check_dims(&self) -> CalResult<()> {
        if self.cell_width_px == 0 || self.cell_height_px == 0 {
            return Err(CalError::invalid_request(format!(
                "cell size must be non-zero, got {}x{}",
                self.cell_width_px, self.cell_height_px
            )));
        }
        if self.cell_width_px > MAX_CELL_DIM || self.cell_height_px > MAX_CELL_DIM {
            return Err(CalError::invalid_request(format!(
                "cell size {}x{} exceeds {MAX_CELL_DIM}x{MAX_CELL_DIM}",
                self.cell_width_px, self.cell_height_px
            )));
        }
        Ok(())
    }

    /// Whether month, day and weekday label are usable for drawing labels.
    pub fn has_valid_labels(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && !self.weekday_label.trim().is_empty()
    }

    /// First day of a month; carries the month banner.
    pub fn is_month_start(&self) -> bool {
        self.day == 1
    }

    /// Same request at `scale` times the pixel size.
    pub(crate) fn scaled(&self, scale: u32) -> CalResult<Self> {
        let w = self.cell_width_px.checked_mul(scale);
        let h = self.cell_height_px.checked_mul(scale);
        let (Some(w), Some(h)) = (w, h) else {
            return Err(CalError::invalid_request("scaled cell size overflows"));
        };
        Ok(Self {
            cell_width_px: w,
            cell_height_px: h,
            ..self.clone()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cell/request.rs"]
mod tests;
