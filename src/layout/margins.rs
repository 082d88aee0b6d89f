use crate::units::Pt;

/// Blank space around the edge of a page. Card sheets use it to bound the
/// grid, answer sheets to bound the text; it is also written as the `ArtBox`
/// of each [`Page`](crate::Page).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// Width left for content on a page of the given width
    pub fn inner_width(&self, page_width: Pt) -> Pt {
        page_width - self.left - self.right
    }

    /// Height left for content on a page of the given height
    pub fn inner_height(&self, page_height: Pt) -> Pt {
        page_height - self.top - self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Mm;

    #[test]
    fn uniform_margins_from_millimetres() {
        let margins = Margins::all(Mm(25.4));
        assert!((margins.left.0 - 72.0).abs() < 1e-4);
        assert!((margins.inner_width(Pt(200.0)).0 - 56.0).abs() < 1e-3);
        assert!((margins.inner_height(Pt(300.0)).0 - 156.0).abs() < 1e-3);
    }
}
