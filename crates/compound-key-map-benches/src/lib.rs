/// A value stored in the benchmarked maps.
pub struct Record {
    pub x: i32,
    pub y: i32,
    pub data: String,
}

impl Record {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, data: format!("data{x},{y}") }
    }
}

/// Returns `size` key pairs laid out on a roughly square grid centered on
/// the origin, so that both key parts take negative and positive values.
pub fn grid_keys(size: usize) -> Vec<(i32, i32)> {
    let side = (size as f64).sqrt().ceil().max(1.0) as i32;
    let half = side / 2;
    (0..size as i32)
        .map(|i| (i / side - half, i % side - half))
        .collect()
}
