use super::tolerance::{round_to, CM2_PER_M2, EPS_LEN};
use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Shoelace sum halved. Positive when the interior lies left of every edge.
pub fn signed_area(poly: &[Point]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut a = 0.0f64;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        a += poly[i].x * poly[j].y - poly[j].x * poly[i].y;
    }
    0.5 * a
}

/// Enclosed area in square meters for centimeter input, unrounded.
pub fn area_m2(poly: &[Point]) -> f64 {
    signed_area(poly).abs() / CM2_PER_M2
}

/// Enclosed area in square meters rounded to two decimals.
pub fn calculate_area(poly: &[Point]) -> f64 {
    round_to(area_m2(poly), 2)
}

pub fn polygon_centroid(poly: &[Point]) -> Option<Point> {
    let first = *poly.first()?;
    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    let mut a = 0.0f64;
    for i in 0..poly.len() {
        let j = (i + 1) % poly.len();
        let cross = poly[i].x * poly[j].y - poly[j].x * poly[i].y;
        a += cross;
        cx += (poly[i].x + poly[j].x) * cross;
        cy += (poly[i].y + poly[j].y) * cross;
    }
    let a = a * 0.5;
    if a.abs() < EPS_LEN {
        return Some(first);
    }
    Some(Point::new(cx / (6.0 * a), cy / (6.0 * a)))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Bounds> {
        let mut it = points.into_iter();
        let p0 = it.next()?;
        let mut b = Bounds { min_x: p0.x, min_y: p0.y, max_x: p0.x, max_y: p0.y };
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }
    pub fn pad(&self, pad: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(s: f64) -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(s, 0.0), Point::new(s, s), Point::new(0.0, s)]
    }

    #[test]
    fn unit_square_is_one_square_meter() {
        assert_eq!(calculate_area(&square(100.0)), 1.00);
        let mut rev = square(100.0);
        rev.reverse();
        assert_eq!(calculate_area(&rev), 1.00);
        assert!(signed_area(&rev) < 0.0);
    }

    #[test]
    fn centroid_of_square() {
        let c = polygon_centroid(&square(100.0)).unwrap();
        assert!((c.x - 50.0).abs() < 1e-9 && (c.y - 50.0).abs() < 1e-9);
        assert!(polygon_centroid(&[]).is_none());
    }

    #[test]
    fn bounds_center() {
        let b = Bounds::of(&square(40.0)).unwrap();
        assert_eq!(b.center(), Point::new(20.0, 20.0));
        assert_eq!(b.width(), 40.0);
    }
}
