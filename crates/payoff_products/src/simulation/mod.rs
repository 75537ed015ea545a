//! Simulation requirements and scenario paths.
//!
//! A product declares, for every point of its timeline, which observables the
//! engine must simulate there ([`SimulationRequirement`]). The engine answers
//! with one [`ScenarioEntry`] per point, each vector laid out in the order of
//! the corresponding request.

use payoff_core::traits::Scalar;
use payoff_core::types::Time;

/// Floating rate fixing between two dates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateDef {
    /// Accrual start
    pub start: Time,
    /// Accrual end
    pub end: Time,
    /// Name of the rate curve
    pub curve: String,
}

impl RateDef {
    /// Creates a rate definition between `start` and `end` on `curve`.
    pub fn new(start: Time, end: Time, curve: impl Into<String>) -> Self {
        Self {
            start,
            end,
            curve: curve.into(),
        }
    }
}

/// Observables requested at one timeline point.
///
/// # Examples
/// ```
/// use payoff_products::SimulationRequirement;
///
/// let req = SimulationRequirement::default()
///     .with_numeraire()
///     .with_forward(1.0)
///     .with_discount(1.5);
///
/// assert!(req.numeraire);
/// assert_eq!(req.forward_mats, vec![1.0]);
/// assert_eq!(req.discount_mats, vec![1.5]);
/// assert!(req.libor_defs.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationRequirement {
    /// Whether the numeraire is needed
    pub numeraire: bool,
    /// Maturities of the forwards observed at this point
    pub forward_mats: Vec<Time>,
    /// Maturities of the discount factors observed at this point
    pub discount_mats: Vec<Time>,
    /// Floating rates fixed at this point
    pub libor_defs: Vec<RateDef>,
}

impl SimulationRequirement {
    /// Requests the numeraire.
    pub fn with_numeraire(mut self) -> Self {
        self.numeraire = true;
        self
    }

    /// Appends a forward observation maturing at `maturity`.
    pub fn with_forward(mut self, maturity: Time) -> Self {
        self.forward_mats.push(maturity);
        self
    }

    /// Appends a discount factor to `maturity`.
    pub fn with_discount(mut self, maturity: Time) -> Self {
        self.discount_mats.push(maturity);
        self
    }

    /// Appends a floating rate fixing.
    pub fn with_libor(mut self, def: RateDef) -> Self {
        self.libor_defs.push(def);
        self
    }
}

/// Observables simulated at one timeline point.
///
/// `numeraire` is always present; its value is only meaningful where the
/// requirement asked for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioEntry<T> {
    /// Forwards, aligned with `forward_mats`
    #[cfg_attr(feature = "serde", serde(default))]
    pub forwards: Vec<T>,
    /// Discount factors, aligned with `discount_mats`
    #[cfg_attr(feature = "serde", serde(default))]
    pub discounts: Vec<T>,
    /// Floating rates, aligned with `libor_defs`
    #[cfg_attr(feature = "serde", serde(default))]
    pub libors: Vec<T>,
    /// Numeraire value
    pub numeraire: T,
}

impl<T: Scalar> ScenarioEntry<T> {
    /// Allocates an entry sized for `req`, observables zeroed and numeraire at one.
    pub fn allocate(req: &SimulationRequirement) -> Self {
        Self {
            forwards: vec![T::zero(); req.forward_mats.len()],
            discounts: vec![T::zero(); req.discount_mats.len()],
            libors: vec![T::zero(); req.libor_defs.len()],
            numeraire: T::one(),
        }
    }
}

/// Simulated path, index-aligned with a product timeline.
pub type Scenario<T> = Vec<ScenarioEntry<T>>;

/// Allocates a scenario sized for `dataline`.
///
/// Engines allocate once per worker and overwrite the values for every path.
///
/// # Examples
/// ```
/// use payoff_products::{allocate_path, RateDef, SimulationRequirement};
///
/// let dataline = vec![
///     SimulationRequirement::default().with_forward(0.0).with_libor(RateDef::new(0.0, 0.5, "libor")),
///     SimulationRequirement::default().with_numeraire().with_forward(0.5),
/// ];
/// let path = allocate_path::<f64>(&dataline);
///
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[0].libors.len(), 1);
/// assert_eq!(path[1].numeraire, 1.0);
/// ```
pub fn allocate_path<T: Scalar>(dataline: &[SimulationRequirement]) -> Scenario<T> {
    dataline.iter().map(ScenarioEntry::allocate).collect()
}
