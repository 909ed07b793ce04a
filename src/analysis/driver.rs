//! Newton-Raphson driver for a single element with prescribed DOFs

use log::debug;
use nalgebra::DVector;

use super::SolverOptions;
use crate::elements::Element;
use crate::error::{FEAError, FEAResult};
use crate::math::{self, Mat};

/// Load-controlled Newton iteration on one element
#[derive(Debug, Clone, Default)]
pub struct NewtonDriver {
    pub options: SolverOptions,
}

impl NewtonDriver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    /// Solve one load step and commit it
    ///
    /// `u` holds the element displacement vector on entry and the converged
    /// solution on return. Prescribed DOFs are set to their values before the
    /// first iteration; the remaining ones are solved so that the resisting
    /// force balances `external_load`. Returns the number of iterations.
    ///
    /// On failure the element is reverted to its last committed state and
    /// `u` is restored.
    pub fn solve_step<E: Element>(
        &self,
        element: &mut E,
        external_load: &DVector<f64>,
        prescribed: &[(usize, f64)],
        u: &mut DVector<f64>,
    ) -> FEAResult<usize> {
        let n_dofs = element.num_dof();
        if external_load.len() != n_dofs || u.len() != n_dofs {
            return Err(FEAError::InvalidInput(format!(
                "element {} has {n_dofs} DOFs, got load of {} and displacement of {}",
                element.tag(),
                external_load.len(),
                u.len()
            )));
        }
        if let Some(&(dof, _)) = prescribed.iter().find(|(dof, _)| *dof >= n_dofs) {
            return Err(FEAError::InvalidInput(format!("prescribed DOF {dof} out of range")));
        }

        let free_dofs: Vec<usize> = (0..n_dofs)
            .filter(|i| !prescribed.iter().any(|(dof, _)| dof == i))
            .collect();
        if free_dofs.is_empty() {
            return Err(FEAError::InvalidInput("No free degrees of freedom".to_string()));
        }

        let start = u.clone();
        for &(dof, value) in prescribed {
            u[dof] = value;
        }

        let n_free = free_dofs.len();
        for iteration in 1..=self.options.max_iterations {
            element.update(u.as_slice())?;
            let k = element.tangent_stiffness();
            let residual = external_load - element.resisting_force();

            // Partition onto the free DOFs
            let mut k11 = Mat::zeros(n_free, n_free);
            let mut r1 = DVector::<f64>::zeros(n_free);
            for (i, &di) in free_dofs.iter().enumerate() {
                r1[i] = residual[di];
                for (j, &dj) in free_dofs.iter().enumerate() {
                    k11[(i, j)] = k[(di, dj)];
                }
            }

            let du = match math::solve_linear_system(&k11, &r1) {
                Some(du) => du,
                None => {
                    element.revert_to_last_commit();
                    *u = start;
                    return Err(FEAError::SingularMatrix);
                }
            };
            for (i, &di) in free_dofs.iter().enumerate() {
                u[di] += du[i];
            }

            let (du_norm, r_norm) = (du.norm(), r1.norm());
            if self.options.log {
                debug!(
                    "element {} iteration {iteration}: |du| = {du_norm:.3e}, |r| = {r_norm:.3e}",
                    element.tag()
                );
            }

            if du_norm <= self.options.tolerance && r_norm <= self.options.tolerance {
                element.update(u.as_slice())?;
                element.commit_state();
                return Ok(iteration);
            }
        }

        element.revert_to_last_commit();
        *u = start;
        Err(FEAError::ConvergenceFailed(self.options.max_iterations))
    }
}
