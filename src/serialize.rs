use crate::airfoil::AirfoilCoords;
use ncollide2d::na::Point2;
use serde::Serialize;

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
pub struct ContourPoint(#[serde(with = "Point2f64")] pub Point2<f64>);

/// The point lists of an airfoil, for output formats which expect (x, y) pairs rather than
/// separate coordinate sequences
#[derive(Serialize)]
pub struct AirfoilPoints {
    pub upper: Vec<ContourPoint>,
    pub lower: Vec<ContourPoint>,
    pub camber: Vec<ContourPoint>,
    pub contour: Vec<ContourPoint>,
}

fn wrap(points: Vec<Point2<f64>>) -> Vec<ContourPoint> {
    points.into_iter().map(ContourPoint).collect()
}

impl From<&AirfoilCoords> for AirfoilPoints {
    fn from(coords: &AirfoilCoords) -> Self {
        AirfoilPoints {
            upper: wrap(coords.upper_points()),
            lower: wrap(coords.lower_points()),
            camber: wrap(coords.camber_points()),
            contour: wrap(coords.to_outer_contour()),
        }
    }
}
