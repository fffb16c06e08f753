//! The ten attractor laws.
//!
//! Each law with coefficients carries its own parameter struct; laws without
//! coefficients are unit structs. [`Law`] dispatches over all of them and is
//! what the registry, the integrator configuration and the WASM bridge pass
//! around.

use crate::traits::AttractorLaw;
use crate::types::Point3;
use serde::{Deserialize, Serialize};

/// Lorenz system: `dx = σ(y − x)`, `dy = ρx − y − xz`, `dz = xy − βz`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lorenz {
    pub sigma: f64,
    pub beta: f64,
    pub rho: f64,
}

impl Default for Lorenz {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            beta: 8.0 / 3.0,
            rho: 28.0,
        }
    }
}

impl AttractorLaw for Lorenz {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(
            self.sigma * (p.y - p.x),
            self.rho * p.x - p.y - p.x * p.z,
            p.x * p.y - self.beta * p.z,
        )
    }
}

/// Rössler system: `dx = −(y + z)`, `dy = x + ay`, `dz = b + z(x − c)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rossler {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for Rossler {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 0.2,
            c: 5.7,
        }
    }
}

impl AttractorLaw for Rossler {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(-(p.y + p.z), p.x + self.a * p.y, self.b + p.z * (p.x - self.c))
    }
}

/// Rikitake two-disc dynamo: `dx = −μx + zy`, `dy = −μy + x(z − a)`, `dz = 1 − xy`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rikitake {
    pub a: f64,
    pub mu: f64,
}

impl Rikitake {
    /// The `a = μ = 1` preset.
    pub fn unit() -> Self {
        Self { a: 1.0, mu: 1.0 }
    }
}

impl Default for Rikitake {
    fn default() -> Self {
        Self { a: 5.0, mu: 2.0 }
    }
}

impl AttractorLaw for Rikitake {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(
            -self.mu * p.x + p.z * p.y,
            -self.mu * p.y + p.x * (p.z - self.a),
            1.0 - p.x * p.y,
        )
    }
}

/// Nosé–Hoover thermostat: `dx = y`, `dy = yz − x`, `dz = 1 − y²`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoseHoover;

impl AttractorLaw for NoseHoover {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(p.y, p.y * p.z - p.x, 1.0 - p.y * p.y)
    }
}

/// Wang system: `dx = x − yz`, `dy = x − y + xz`, `dz = −3z + xy`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wang;

impl AttractorLaw for Wang {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(p.x - p.y * p.z, p.x - p.y + p.x * p.z, -3.0 * p.z + p.x * p.y)
    }
}

/// Forced Duffing oscillator with `z` as phase: `dx = y`,
/// `dy = −ay − x³ + b·cos(z)`, `dz = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duffing {
    #[serde(alias = "alpha")]
    pub a: f64,
    #[serde(alias = "beta")]
    pub b: f64,
}

impl Default for Duffing {
    fn default() -> Self {
        Self { a: 0.1, b: 11.0 }
    }
}

impl AttractorLaw for Duffing {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(
            p.y,
            -self.a * p.y - p.x * p.x * p.x + self.b * p.z.cos(),
            1.0,
        )
    }
}

/// Unforced Duffing map: `dx = y`, `dy = ay − y³ − bx`, `dz = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuffingMap {
    #[serde(alias = "alpha")]
    pub a: f64,
    #[serde(alias = "beta")]
    pub b: f64,
}

impl Default for DuffingMap {
    fn default() -> Self {
        Self { a: 2.75, b: 0.2 }
    }
}

impl AttractorLaw for DuffingMap {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(p.y, self.a * p.y - p.y * p.y * p.y - self.b * p.x, 1.0)
    }
}

/// Chua circuit with the piecewise-linear diode characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chua {
    pub alpha: f64,
    pub beta: f64,
    pub mu0: f64,
    pub mu1: f64,
}

impl Chua {
    /// Diode current `h(x) = μ1·x + ½(μ0 − μ1)(|x + 1| − |x − 1|)`.
    pub fn diode(&self, x: f64) -> f64 {
        self.mu1 * x + 0.5 * (self.mu0 - self.mu1) * ((x + 1.0).abs() - (x - 1.0).abs())
    }
}

impl Default for Chua {
    fn default() -> Self {
        Self {
            alpha: 15.6,
            beta: 28.0,
            mu0: -1.143,
            mu1: -0.714,
        }
    }
}

impl AttractorLaw for Chua {
    fn step(&self, p: Point3) -> Point3 {
        let ht = self.diode(p.x);
        Point3::new(self.alpha * (p.y - p.x - ht), p.x - p.y + p.z, -self.beta * p.y)
    }
}

/// Chua-type system with a cubic nonlinearity: `dx = 0.3y + x − x³`,
/// `dy = x + z`, `dz = y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChuaCubic;

impl AttractorLaw for ChuaCubic {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(0.3 * p.y + p.x - p.x * p.x * p.x, p.x + p.z, p.y)
    }
}

/// Three-species competitive Lotka–Volterra system.
///
/// Sensitive to the seed; see [`Law::recommended_init_point`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LotkaVolterra;

impl AttractorLaw for LotkaVolterra {
    fn step(&self, p: Point3) -> Point3 {
        Point3::new(
            p.x * (1.0 - p.x - 9.0 * p.y),
            -p.y * (1.0 - 6.0 * p.x - p.y + 9.0 * p.z),
            p.z * (1.0 - 3.0 * p.x - p.z),
        )
    }
}

/// Any of the supported laws together with its parameters.
///
/// Serialized as an object tagged by `system`, e.g.
/// `{"system": "lorenz", "sigma": 10.0}`. Missing parameters take their
/// defaults and unrecognized keys are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "kebab-case")]
pub enum Law {
    Lorenz(Lorenz),
    Rossler(Rossler),
    Rikitake(Rikitake),
    NoseHoover,
    Wang,
    Duffing(Duffing),
    DuffingMap(DuffingMap),
    Chua(Chua),
    ChuaCubic,
    LotkaVolterra,
}

impl Law {
    /// Every law with its default parameters, in registry order.
    pub fn all() -> [Law; 10] {
        [
            Law::Lorenz(Lorenz::default()),
            Law::Rossler(Rossler::default()),
            Law::Rikitake(Rikitake::default()),
            Law::NoseHoover,
            Law::Wang,
            Law::Duffing(Duffing::default()),
            Law::DuffingMap(DuffingMap::default()),
            Law::Chua(Chua::default()),
            Law::ChuaCubic,
            Law::LotkaVolterra,
        ]
    }

    /// Canonical identifier, as accepted by the registry.
    pub fn name(&self) -> &'static str {
        match self {
            Law::Lorenz(_) => "lorenz",
            Law::Rossler(_) => "rossler",
            Law::Rikitake(_) => "rikitake",
            Law::NoseHoover => "nose-hoover",
            Law::Wang => "wang",
            Law::Duffing(_) => "duffing",
            Law::DuffingMap(_) => "duffing-map",
            Law::Chua(_) => "chua",
            Law::ChuaCubic => "chua-cubic",
            Law::LotkaVolterra => "lotka-volterra",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Law::Lorenz(_) => "Lorenz",
            Law::Rossler(_) => "Rössler",
            Law::Rikitake(_) => "Rikitake",
            Law::NoseHoover => "Nosé–Hoover",
            Law::Wang => "Wang",
            Law::Duffing(_) => "Duffing",
            Law::DuffingMap(_) => "Duffing map",
            Law::Chua(_) => "Chua",
            Law::ChuaCubic => "Chua (cubic)",
            Law::LotkaVolterra => "Lotka–Volterra",
        }
    }

    /// Current parameter values by name.
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        match self {
            Law::Lorenz(l) => vec![("sigma", l.sigma), ("beta", l.beta), ("rho", l.rho)],
            Law::Rossler(r) => vec![("a", r.a), ("b", r.b), ("c", r.c)],
            Law::Rikitake(r) => vec![("a", r.a), ("mu", r.mu)],
            Law::Duffing(d) => vec![("a", d.a), ("b", d.b)],
            Law::DuffingMap(d) => vec![("a", d.a), ("b", d.b)],
            Law::Chua(c) => vec![
                ("alpha", c.alpha),
                ("beta", c.beta),
                ("mu0", c.mu0),
                ("mu1", c.mu1),
            ],
            Law::NoseHoover | Law::Wang | Law::ChuaCubic | Law::LotkaVolterra => Vec::new(),
        }
    }

    /// Sets one named parameter. Returns `false` when this law has no
    /// parameter called `key`.
    pub fn set_parameter(&mut self, key: &str, value: f64) -> bool {
        let slot = match (self, key) {
            (Law::Lorenz(l), "sigma") => &mut l.sigma,
            (Law::Lorenz(l), "beta") => &mut l.beta,
            (Law::Lorenz(l), "rho") => &mut l.rho,
            (Law::Rossler(r), "a") => &mut r.a,
            (Law::Rossler(r), "b") => &mut r.b,
            (Law::Rossler(r), "c") => &mut r.c,
            (Law::Rikitake(r), "a") => &mut r.a,
            (Law::Rikitake(r), "mu") => &mut r.mu,
            (Law::Duffing(d), "a" | "alpha") => &mut d.a,
            (Law::Duffing(d), "b" | "beta") => &mut d.b,
            (Law::DuffingMap(d), "a" | "alpha") => &mut d.a,
            (Law::DuffingMap(d), "b" | "beta") => &mut d.b,
            (Law::Chua(c), "alpha") => &mut c.alpha,
            (Law::Chua(c), "beta") => &mut c.beta,
            (Law::Chua(c), "mu0") => &mut c.mu0,
            (Law::Chua(c), "mu1") => &mut c.mu1,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// A seed known to keep this law's trajectory bounded under the default
    /// step. Lotka–Volterra collapses or explodes from the generic seed.
    pub fn recommended_init_point(&self) -> Point3 {
        match self {
            Law::LotkaVolterra => Point3::new(0.6, 0.2, 0.01),
            _ => Point3::default(),
        }
    }
}

impl AttractorLaw for Law {
    fn step(&self, point: Point3) -> Point3 {
        match self {
            Law::Lorenz(l) => l.step(point),
            Law::Rossler(r) => r.step(point),
            Law::Rikitake(r) => r.step(point),
            Law::NoseHoover => NoseHoover.step(point),
            Law::Wang => Wang.step(point),
            Law::Duffing(d) => d.step(point),
            Law::DuffingMap(d) => d.step(point),
            Law::Chua(c) => c.step(point),
            Law::ChuaCubic => ChuaCubic.step(point),
            Law::LotkaVolterra => LotkaVolterra.step(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point3, expected: (f64, f64, f64), tol: f64) {
        let expected = Point3::from(expected);
        for (a, e) in actual.to_array().iter().zip(expected.to_array()) {
            assert!(
                (a - e).abs() <= tol * e.abs().max(1.0),
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    #[test]
    fn documented_increments_match() {
        let lorenz = Lorenz::default().step(Point3::new(0.0, 1.0, -1.0));
        assert_eq!(lorenz, Point3::new(10.0, -1.0, 8.0 / 3.0));

        let rossler = Rossler::default().step(Point3::new(0.0, 1.0, -1.0));
        assert_close(rossler, (0.0, 0.2, 5.9), 1e-12);

        let chua = Chua::default().step(Point3::new(0.0, 1.0, 0.0));
        assert_close(chua, (15.6, -1.0, -28.0), 1e-12);

        let duffing = Duffing::default().step(Point3::new(0.0, 1.0, -1.0));
        assert_close(duffing, (1.0, 5.843325364549537, 1.0), 1e-12);

        let duffing_map = DuffingMap::default().step(Point3::new(0.0, 0.5, -1.0));
        assert_close(duffing_map, (0.5, 1.25, 1.0), 1e-12);

        let lotka = LotkaVolterra.step(Point3::new(0.0, 1.0, -1.0));
        assert_eq!(lotka, Point3::new(0.0, 9.0, -2.0));

        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(Wang.step(p), Point3::new(-5.0, 2.0, -7.0));
        assert_close(ChuaCubic.step(p), (0.6, 4.0, 2.0), 1e-12);
        assert_eq!(NoseHoover.step(p), Point3::new(2.0, 5.0, -3.0));
        assert_eq!(Rikitake::default().step(p), Point3::new(4.0, -6.0, -1.0));
        assert_eq!(Rikitake::unit().step(p), Point3::new(5.0, 0.0, -1.0));

        let duffing_map = DuffingMap::default().step(Point3::new(1.0, 0.5, 0.0));
        assert_close(duffing_map, (0.5, 1.05, 1.0), 1e-12);
    }

    #[test]
    fn origin_is_a_fixed_point_where_expected() {
        for law in [Law::Wang, Law::Chua(Chua::default()), Law::ChuaCubic, Law::LotkaVolterra] {
            assert_eq!(law.step(Point3::ORIGIN), Point3::ORIGIN, "{}", law.name());
        }
    }

    #[test]
    fn origin_increments_for_non_fixed_laws() {
        assert_eq!(NoseHoover.step(Point3::ORIGIN), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(Rikitake::default().step(Point3::ORIGIN), Point3::new(0.0, 0.0, 1.0));
        assert_close(Rossler::default().step(Point3::ORIGIN), (0.0, 0.0, 0.2), 1e-15);
        assert_close(Duffing::default().step(Point3::ORIGIN), (0.0, 11.0, 1.0), 1e-15);
        assert_eq!(Lorenz::default().step(Point3::ORIGIN), Point3::ORIGIN);
    }

    #[test]
    fn chua_diode_is_piecewise_linear() {
        let chua = Chua::default();
        let cases = [
            ((1.0, 0.0, 0.0), (2.2308, 1.0, 0.0)),
            ((1.0, 2.0, 3.0), (33.4308, 2.0, -56.0)),
            ((-1000.0, 2000.0, -3000.0), (35654.9076, -6000.0, -56000.0)),
            ((1e-3, 1e-4, 1e-5), (3.7908e-3, 9.1e-4, -2.8e-3)),
        ];
        for (input, expected) in cases {
            assert_close(chua.step(Point3::from(input)), expected, 1e-9);
        }
        // Slope inside the inner segment is mu0, outside it is mu1.
        assert!((chua.diode(0.5) - 0.5 * chua.mu0).abs() < 1e-15);
        assert!((chua.diode(3.0) - (3.0 * chua.mu1 + chua.mu0 - chua.mu1)).abs() < 1e-12);
    }

    #[test]
    fn chua_with_custom_parameters() {
        let chua = Chua {
            alpha: 11.0,
            beta: 43.0,
            mu0: -1.3,
            mu1: -0.9,
        };
        assert_close(chua.step(Point3::new(1.0, 2.0, 3.0)), (25.3, 2.0, -86.0), 1e-12);
        assert_close(chua.step(Point3::new(-0.01, 0.2, 100.0)), (2.167, 99.79, -8.6), 1e-9);
    }

    #[test]
    fn set_parameter_accepts_known_keys_only() {
        let mut law = Law::Lorenz(Lorenz::default());
        assert!(law.set_parameter("rho", 99.0));
        assert!(!law.set_parameter("gamma", 1.0));
        assert_eq!(
            law,
            Law::Lorenz(Lorenz {
                rho: 99.0,
                ..Lorenz::default()
            })
        );

        let mut duffing = Law::Duffing(Duffing::default());
        assert!(duffing.set_parameter("alpha", 0.3));
        assert!(duffing.set_parameter("b", 7.0));
        assert_eq!(duffing, Law::Duffing(Duffing { a: 0.3, b: 7.0 }));

        let mut wang = Law::Wang;
        assert!(!wang.set_parameter("a", 1.0));
    }

    #[test]
    fn parameters_list_matches_defaults() {
        let chua = Law::Chua(Chua::default());
        assert_eq!(
            chua.parameters(),
            vec![("alpha", 15.6), ("beta", 28.0), ("mu0", -1.143), ("mu1", -0.714)]
        );
        assert!(Law::NoseHoover.parameters().is_empty());
        assert_eq!(Rikitake::unit(), Rikitake { a: 1.0, mu: 1.0 });
    }

    #[test]
    fn law_names_are_unique() {
        let names: Vec<&str> = Law::all().iter().map(Law::name).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate name {name}");
        }
    }

    #[test]
    fn lotka_volterra_has_a_dedicated_seed() {
        assert_eq!(
            Law::LotkaVolterra.recommended_init_point(),
            Point3::new(0.6, 0.2, 0.01)
        );
        assert_eq!(Law::Wang.recommended_init_point(), Point3::default());
    }
}
