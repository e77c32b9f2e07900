/// Polynomial in one variable, coefficients highest degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// An empty coefficient list is the zero polynomial.
    pub fn new(coeffs: Vec<f64>) -> Self {
        if coeffs.is_empty() {
            return Self { coeffs: vec![0.0] };
        }
        Self { coeffs }
    }

    pub fn constant(value: f64) -> Self {
        Self { coeffs: vec![value] }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// `wa * self + wb * other`, aligned on the constant term.
    pub fn combine(&self, wa: f64, other: &Polynomial, wb: f64) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let pad_a = len - self.coeffs.len();
        let pad_b = len - other.coeffs.len();
        let coeffs = (0..len)
            .map(|i| {
                let a = if i >= pad_a { self.coeffs[i - pad_a] } else { 0.0 };
                let b = if i >= pad_b { other.coeffs[i - pad_b] } else { 0.0 };
                wa * a + wb * b
            })
            .collect();
        Polynomial { coeffs }
    }
}
