/// Dense row-major `side x side` block of intensities for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileBuffer {
    side: u32,
    data: Vec<f32>,
}

impl TileBuffer {
    #[must_use]
    pub fn new(side: u32) -> Self {
        let len = side as usize * side as usize;

        Self {
            side,
            data: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, px: u32, py: u32) -> Option<f32> {
        if px >= self.side || py >= self.side {
            return None;
        }

        Some(self.data[py as usize * self.side as usize + px as usize])
    }

    #[must_use]
    pub fn row(&self, py: u32) -> &[f32] {
        let start = py as usize * self.side as usize;
        &self.data[start..start + self.side as usize]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}
