use serde::Serialize;
use std::collections::HashMap;

/// Passive, append-only recorder of turtle geometry. Nothing in this
/// module draws anything; a renderer consumes the recorded state after
/// `execute()` returns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Canvas {
    turtle_lines: HashMap<usize, Vec<(f64, f64)>>,
    turtle_angles: HashMap<usize, f64>,
    next_id: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new turtle starting at the origin and returns its id.
    pub fn add_turtle(&mut self) -> usize {
        let id = self.next_id;
        self.turtle_lines.insert(id, vec![(0.0, 0.0)]);
        self.turtle_angles.insert(id, 0.0);
        self.next_id += 1;
        id
    }

    /// Appends `last + (dx, dy)` to the turtle's polyline.
    pub fn move_turtle(&mut self, id: usize, dx: f64, dy: f64) {
        let line = self.turtle_lines.get_mut(&id).expect("turtle id always registered via add_turtle");
        let &(x, y) = line.last().expect("a turtle's polyline always has a starting point");
        line.push((x + dx, y + dy));
    }

    /// Overwrites the turtle's recorded heading.
    pub fn rotate_turtle(&mut self, id: usize, angle_deg: f64) {
        self.turtle_angles.insert(id, angle_deg);
    }

    pub fn turtle_lines(&self) -> &HashMap<usize, Vec<(f64, f64)>> {
        &self.turtle_lines
    }

    pub fn turtle_angles(&self) -> &HashMap<usize, f64> {
        &self.turtle_angles
    }

    pub fn next_id(&self) -> usize {
        self.next_id
    }
}
