//! Solver configuration.

/// Which linear solver handles the six load-case systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverMethod {
    /// Jacobi-preconditioned conjugate gradient (default; the system is
    /// sparse, symmetric, and positive semi-definite).
    #[default]
    ConjugateGradient,
    /// Dense LU direct solve. Only sensible for small voxel meshes.
    Direct,
}

/// Parameters for the homogenization solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomogenizationParams {
    /// Solver selection.
    pub method: SolverMethod,
    /// Relative residual tolerance for the iterative solver.
    pub tolerance: f64,
    /// Iteration cap for the iterative solver.
    pub max_iterations: usize,
}

impl Default for HomogenizationParams {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            tolerance: 1e-8,
            max_iterations: 5000,
        }
    }
}

impl HomogenizationParams {
    /// Select the direct solver.
    #[must_use]
    pub const fn direct() -> Self {
        Self {
            method: SolverMethod::Direct,
            tolerance: 1e-8,
            max_iterations: 5000,
        }
    }

    /// Override the iterative tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Override the iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cg() {
        let params = HomogenizationParams::default();
        assert_eq!(params.method, SolverMethod::ConjugateGradient);
        assert!(params.tolerance > 0.0);
    }

    #[test]
    fn builder_overrides() {
        let params = HomogenizationParams::direct()
            .with_tolerance(1e-10)
            .with_max_iterations(100);
        assert_eq!(params.method, SolverMethod::Direct);
        assert!((params.tolerance - 1e-10).abs() < f64::EPSILON);
        assert_eq!(params.max_iterations, 100);
    }
}
