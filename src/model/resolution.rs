use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Resolution as typed into the input fields, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawResolution {
    pub columns: f64,
    pub rows: f64,
}

impl RawResolution {
    pub fn parse(columns: &str, rows: &str) -> RawResolution {
        RawResolution {
            columns: Self::parse_axis(columns),
            rows: Self::parse_axis(rows),
        }
    }

    // Numeric coercion of field text: blank reads as 0, garbage as NaN.
    fn parse_axis(text: &str) -> f64 {
        let text = text.trim();
        if text.is_empty() {
            return 0.0;
        }
        text.parse::<f64>().unwrap_or(f64::NAN)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub columns: u32,
    pub rows: u32,
}

impl Resolution {
    pub fn new(columns: u32, rows: u32) -> Resolution {
        Resolution { columns, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.columns, self.rows)
    }
}
