use super::SurfaceSamples;
use itertools::izip;

/// An AirfoilGenerator is an entity which can compute the height of the mean camber line and
/// the airfoil thickness at fractions of a unit chord. This is enough to sample the upper and
/// lower surfaces at any set of chordwise positions.
pub trait AirfoilGenerator {
    /// Return the height of the camber line at a fraction from 0.0 to 1.0
    fn camber(&self, x: f64) -> f64;

    /// Return the full thickness of the airfoil with respect to the camber line at a fraction
    /// from 0.0 to 1.0
    fn thickness(&self, x: f64) -> f64;

    /// Samples the upper and lower surfaces at each of the positions in `x`, offsetting the
    /// camber line vertically by half the thickness
    fn sample(&self, x: &[f64]) -> SurfaceSamples {
        let camber: Vec<f64> = x.iter().map(|&f| self.camber(f)).collect();
        let thickness: Vec<f64> = x.iter().map(|&f| self.thickness(f)).collect();

        SurfaceSamples::new(
            x.to_vec(),
            izip!(&camber, &thickness).map(|(c, t)| c + t / 2.0).collect(),
            izip!(&camber, &thickness).map(|(c, t)| c - t / 2.0).collect(),
        )
    }
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
pub struct Naca4Digit {
    t: f64,
    m: f64,
    p: f64,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator.
    ///
    /// # Arguments
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4
    pub fn new(t_max: f64, max_camber: f64, max_camber_chord: f64) -> Naca4Digit {
        Naca4Digit {
            t: t_max,
            m: max_camber,
            p: max_camber_chord,
        }
    }

    /// Parses a four digit designation such as "2412"
    pub fn from_designation(digits: &str) -> Option<Naca4Digit> {
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let m: f64 = digits[0..1].parse().ok()?;
        let p: f64 = digits[1..2].parse().ok()?;
        let t: f64 = digits[2..4].parse().ok()?;

        Some(Naca4Digit::new(t / 100.0, m / 100.0, p / 10.0))
    }
}

impl AirfoilGenerator for Naca4Digit {
    fn camber(&self, x: f64) -> f64 {
        if self.p < 1e-6 {
            0.0
        } else if x < self.p {
            (self.m / self.p.powf(2.0)) * (2.0 * self.p * x - x.powf(2.0))
        } else {
            (self.m / (1.0 - self.p).powf(2.0))
                * ((1.0 - 2.0 * self.p) + 2.0 * self.p * x - x.powf(2.0))
        }
    }

    fn thickness(&self, x: f64) -> f64 {
        (2.0 * self.t)
            * (1.485 * x.sqrt()
                + -0.630 * x
                + -1.758 * x.powf(2.0)
                + 1.4215 * x.powf(3.0)
                + -0.5075 * x.powf(4.0))
    }
}
