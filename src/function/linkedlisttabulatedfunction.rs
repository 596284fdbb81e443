use std::fmt;
use std::iter::FusedIterator;

use crate::function::mathfunction::MathFunction;
use crate::function::point::Point;
use crate::function::tabulatedfunction::{
    self,
    MutableTabulatedFunction,
    PointIter,
    TabulatedFunction
};
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};

// ─────────────────────────────────────────────────────────────────────────────
// Node arena
// ─────────────────────────────────────────────────────────────────────────────
//
// The ring lives in `nodes`; `prev` / `next` are slots in that vector. Slots of
// removed nodes go on `free` and are reused by later inserts.
//
//   head ──► smallest x
//   nodes[head].prev ──► largest x (tail)

#[derive(Debug, Clone, Copy)]
struct Node {
    x: f64,
    y: f64,
    prev: usize,
    next: usize
}

impl Node {
    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Tabulated function over a circular doubly-linked ring of samples.
#[derive(Debug, Clone)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: usize,
    count: usize
}

impl LinkedListTabulatedFunction {
    /// Copies validated coordinate arrays into a fresh ring.
    pub fn new(x_values: &[f64], y_values: &[f64]) -> TabulatedResult<LinkedListTabulatedFunction> {
        tabulatedfunction::validate_coordinates(x_values, y_values)?;
        Ok(Self::from_sorted(x_values, y_values))
    }

    pub fn from_function<F>(source: &F, from: f64, to: f64, count: usize) -> TabulatedResult<LinkedListTabulatedFunction>
    where
        F: MathFunction + ?Sized,
    {
        let (x_values, y_values) = tabulatedfunction::sample(source, from, to, count)?;
        Ok(Self::from_sorted(&x_values, &y_values))
    }

    fn from_sorted(x_values: &[f64], y_values: &[f64]) -> LinkedListTabulatedFunction {
        let count = x_values.len();
        let nodes = x_values.iter()
            .zip(y_values)
            .enumerate()
            .map(|(i, (&x, &y))| Node {
                x,
                y,
                prev: (i + count - 1) % count,
                next: (i + 1) % count
            })
            .collect();
        LinkedListTabulatedFunction { nodes, free: Vec::new(), head: 0, count }
    }

    fn tail(&self) -> usize {
        self.nodes[self.head].prev
    }

    /// Slot of the sample at `index`, walking from whichever end of the ring is closer.
    fn slot(&self, index: usize) -> TabulatedResult<usize> {
        tabulatedfunction::check_index(index, self.count)?;
        let mut current = self.head;
        if index <= self.count / 2 {
            for _ in 0..index {
                current = self.nodes[current].next;
            }
        } else {
            for _ in index..self.count {
                current = self.nodes[current].prev;
            }
        }
        Ok(current)
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Splices a new node in right after `prev` and returns its slot.
    fn link_after(&mut self, prev: usize, x: f64, y: f64) -> usize {
        let next = self.nodes[prev].next;
        let slot = self.allocate(Node { x, y, prev, next });
        self.nodes[prev].next = slot;
        self.nodes[next].prev = slot;
        self.count += 1;
        slot
    }

    fn unlink(&mut self, slot: usize) {
        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if slot == self.head {
            self.head = next;
        }
        self.free.push(slot);
        self.count -= 1;
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        tabulatedfunction::evaluate(self, x)
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn point(&self, index: usize) -> TabulatedResult<Point> {
        let slot = self.slot(index)?;
        Ok(self.nodes[slot].point())
    }

    fn set_y(&mut self, index: usize, value: f64) -> TabulatedResult<()> {
        let slot = self.slot(index)?;
        self.nodes[slot].y = value;
        Ok(())
    }

    fn left_segment(&self) -> (Point, Point) {
        let first = &self.nodes[self.head];
        (first.point(), self.nodes[first.next].point())
    }

    fn right_segment(&self) -> (Point, Point) {
        let last = &self.nodes[self.tail()];
        (self.nodes[last.prev].point(), last.point())
    }

    fn bracket(&self, floor_index: usize) -> TabulatedResult<(Point, Point)> {
        tabulatedfunction::check_index(floor_index + 1, self.count)?;
        let left = &self.nodes[self.slot(floor_index)?];
        Ok((left.point(), self.nodes[left.next].point()))
    }

    fn iter(&self) -> PointIter<'_> {
        Box::new(LinkedListTabulatedFunctionIter {
            function: self,
            current: self.head,
            remaining: self.count
        })
    }

    fn left_bound(&self) -> f64 {
        self.nodes[self.head].x
    }

    fn right_bound(&self) -> f64 {
        self.nodes[self.tail()].x
    }
}

impl MutableTabulatedFunction for LinkedListTabulatedFunction {
    fn insert(&mut self, x: f64, y: f64) -> TabulatedResult<()> {
        if !x.is_finite() {
            return Err(TabulatedFunctionError::NonFiniteCoordinate(x));
        }
        if let Some(index) = self.index_of_x(x) {
            return self.set_y(index, y);
        }

        let tail = self.tail();
        if x < self.nodes[self.head].x {
            self.head = self.link_after(tail, x, y);
        } else if x > self.nodes[tail].x {
            self.link_after(tail, x, y);
        } else {
            let floor_index = self.floor_index_of_x(x)?;
            let prev = self.slot(floor_index)?;
            self.link_after(prev, x, y);
        }
        Ok(())
    }

    fn remove(&mut self, index: usize) -> TabulatedResult<()> {
        tabulatedfunction::check_removable(index, self.count)?;
        let slot = self.slot(index)?;
        self.unlink(slot);
        Ok(())
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        tabulatedfunction::fmt_points(self, "LinkedListTabulatedFunction", f)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Iterator
// ─────────────────────────────────────────────────────────────────────────────

pub struct LinkedListTabulatedFunctionIter<'a> {
    function: &'a LinkedListTabulatedFunction,
    current: usize,
    remaining: usize
}

impl Iterator for LinkedListTabulatedFunctionIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.function.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        Some(node.point())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LinkedListTabulatedFunctionIter<'_> {}

impl FusedIterator for LinkedListTabulatedFunctionIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_is_consistent(function: &LinkedListTabulatedFunction) -> bool {
        let mut slot = function.head;
        for _ in 0..function.count {
            let next = function.nodes[slot].next;
            if function.nodes[next].prev != slot {
                return false;
            }
            slot = next;
        }
        slot == function.head
    }

    #[test]
    fn test_ring_links_after_construction() {
        let function = LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        assert!(ring_is_consistent(&function));
        assert_eq!(function.tail(), 2);
    }

    #[test]
    fn test_insert_new_head_and_tail() {
        let mut function = LinkedListTabulatedFunction::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        function.insert(-1.0, 5.0).unwrap();
        function.insert(3.0, 7.0).unwrap();
        assert!(ring_is_consistent(&function));
        assert_eq!(function.left_bound(), -1.0);
        assert_eq!(function.right_bound(), 3.0);
        assert_eq!(function.count(), 4);
    }

    #[test]
    fn test_removed_slot_is_reused() {
        let mut function = LinkedListTabulatedFunction::new(&[0.0, 1.0, 2.0], &[0.0; 3]).unwrap();
        function.remove(0).unwrap();
        assert_eq!(function.left_bound(), 1.0);
        function.insert(1.5, 1.0).unwrap();
        assert_eq!(function.nodes.len(), 3);
        assert!(ring_is_consistent(&function));
        assert_eq!(function.x(1).unwrap(), 1.5);
    }

    #[test]
    fn test_slot_walks_backwards_for_upper_half() {
        let x_values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let function = LinkedListTabulatedFunction::new(&x_values, &x_values).unwrap();
        for index in 0..10 {
            assert_eq!(function.x(index).unwrap(), index as f64);
        }
    }
}
