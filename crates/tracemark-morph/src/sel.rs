//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Each element is a hit, a miss or ignored, and offsets are
//! measured from the origin `(cx, cy)`.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - must match foreground (set pixels)
    Hit = 1,
    /// Miss - must match background (unset pixels)
    Miss = 2,
}

/// Structuring Element (SEL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element of don't-care elements
    ///
    /// The origin is placed at the center.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
            name: None,
        })
    }

    /// Create a structuring element from a string pattern
    ///
    /// Rows are separated by newlines and must all have the same length.
    ///
    /// - `x` hit, `o` miss, space or `.` don't care
    /// - `X` and `C` are a hit at the origin, `O` a miss at the origin
    ///
    /// Without an origin marker the origin is the center.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&[u8]> = pattern.lines().map(str::as_bytes).collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if rows.iter().any(|r| r.len() as u32 != width) {
            return Err(MorphError::InvalidSel(format!(
                "ragged pattern: {:?}",
                pattern
            )));
        }

        let mut sel = Self::new(width, height)?;
        let mut origin = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                let elem = match ch {
                    b'x' => SelElement::Hit,
                    b'o' => SelElement::Miss,
                    b' ' | b'.' => SelElement::DontCare,
                    b'X' | b'C' => {
                        origin = Some((x as u32, y as u32));
                        SelElement::Hit
                    }
                    b'O' => {
                        origin = Some((x as u32, y as u32));
                        SelElement::Miss
                    }
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {:?} in pattern",
                            other as char
                        )));
                    }
                };
                sel.set_element(x as u32, y as u32, elem);
            }
        }
        if let Some((cx, cy)) = origin {
            sel.set_origin(cx, cy)?;
        }
        Ok(sel)
    }

    /// Get the width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Move the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{}",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get the element at (x, y)
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set the element at (x, y); out-of-range positions are ignored
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Number of miss elements
    pub fn miss_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Miss).count()
    }

    /// Rotate by `quads` quarter turns clockwise
    ///
    /// The origin rotates with the elements.
    pub fn rotate_orth(&self, quads: u32) -> Self {
        let mut sel = self.clone();
        for _ in 0..quads % 4 {
            sel = sel.rotate_quarter();
        }
        sel
    }

    fn rotate_quarter(&self) -> Self {
        let (w, h) = (self.height, self.width);
        let mut data = vec![SelElement::DontCare; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let (nx, ny) = (self.height - 1 - y, x);
                data[(ny * w + nx) as usize] = self.data[(y * self.width + x) as usize];
            }
        }
        Self {
            width: w,
            height: h,
            cx: self.height - 1 - self.cy,
            cy: self.cx,
            data,
            name: self.name.clone(),
        }
    }

    fn offsets_of(&self, kind: SelElement) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (w, cx, cy) = (self.width, self.cx as i32, self.cy as i32);
        self.data
            .iter()
            .enumerate()
            .filter(move |&(_, &e)| e == kind)
            .map(move |(i, _)| {
                let i = i as u32;
                ((i % w) as i32 - cx, (i / w) as i32 - cy)
            })
    }

    /// Offsets of hit elements relative to the origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Hit)
    }

    /// Offsets of miss elements relative to the origin
    pub fn miss_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets_of(SelElement::Miss)
    }
}
