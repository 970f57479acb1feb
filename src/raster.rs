use crate::vector::Vector3;

/// Colour buffer addressed by `(row, col)`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Vector3<f32>>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Raster {
        Raster {
            width,
            height,
            pixels: vec![Vector3::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Vector3<f32> {
        self.pixels[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Vector3<f32>) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    /// Top row first, left to right.
    pub fn pixels(&self) -> &[Vector3<f32>] {
        &self.pixels
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) outside {}x{} raster",
            row,
            col,
            self.width,
            self.height
        );
        row * self.width + col
    }
}
