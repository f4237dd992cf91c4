//! Page layout calculations

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * 25.4)
    }

    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt * 25.4 / 72.0)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page size in PDF points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// Page size taken from pixel dimensions, one pixel per point
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Physical width of the page
    pub fn width_length(&self) -> Length {
        Length::from_pt(self.width)
    }

    /// Physical height of the page
    pub fn height_length(&self) -> Length {
        Length::from_pt(self.height)
    }
}

/// Where an image is drawn on a page, in points from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImagePlacement {
    /// The six `cm` operands that map the unit square onto this placement
    pub fn matrix(&self) -> [f64; 6] {
        [self.width, 0.0, 0.0, self.height, self.x, self.y]
    }
}

/// Scale an image to fit inside the page, keeping its aspect ratio, and center it
///
/// The image is enlarged or shrunk as needed, so it always touches two
/// opposite edges of the page.
pub fn fit_into(image_width: f64, image_height: f64, page: &PageSize) -> ImagePlacement {
    if image_width <= 0.0 || image_height <= 0.0 {
        return ImagePlacement { x: 0.0, y: 0.0, width: page.width, height: page.height };
    }

    let scale = (page.width / image_width).min(page.height / image_height);
    let width = image_width * scale;
    let height = image_height * scale;

    ImagePlacement {
        x: (page.width - width) / 2.0,
        y: (page.height - height) / 2.0,
        width,
        height,
    }
}
