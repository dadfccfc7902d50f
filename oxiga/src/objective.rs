/// An interface for the functions being minimized.
///
/// Implementations must be pure: the same point
/// must always yield the same value. Lower values
/// are better.
///
/// Any `Fn(f64, f64) -> f64` is an objective.
///
/// # Examples
/// ```
/// use oxiga::Objective;
///
/// let sphere = |x: f64, y: f64| x * x + y * y;
/// assert_eq!(sphere.evaluate(3.0, 4.0), 25.0);
/// ```
pub trait Objective {
    /// Returns the objective's value at `(x, y)`.
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64, f64) -> f64,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Himmelblau's function. Has four global minima
/// of value 0 inside the default [-5, 5] domain,
/// one of them at (3, 2).
///
/// # Examples
/// ```
/// use oxiga::himmelblau;
///
/// assert_eq!(himmelblau(3.0, 3.0), 26.0);
/// assert_eq!(himmelblau(3.0, 2.0), 0.0);
/// ```
pub fn himmelblau(x: f64, y: f64) -> f64 {
    (x.powi(2) + y - 11.0).powi(2) + (x + y.powi(2) - 7.0).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn himmelblau_minima() {
        let minima = [
            (3.0, 2.0),
            (-2.805118, 3.131312),
            (-3.779310, -3.283186),
            (3.584428, -1.848126),
        ];
        for (x, y) in minima {
            assert!(himmelblau(x, y) < 1e-6, "f({}, {}) = {}", x, y, himmelblau(x, y));
        }
    }

    #[test]
    fn boxed_objective() {
        let objective: Box<dyn Objective> = Box::new(himmelblau);
        assert_eq!(objective.evaluate(3.0, 3.0), 26.0);
    }
}
