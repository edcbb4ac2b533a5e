pub mod univariate_polynomial_dense;
