//! Per-sample loss values and their gradients with respect to the network
//! output. Each pair takes `(predicted, expected)` of equal length.

/// Keeps `ln` finite when a probability reaches 0 or 1.
const EPS: f64 = 1e-12;

fn width(predicted: &[f64]) -> f64 {
    predicted.len().max(1) as f64
}

/// mean((p - y)²)
pub fn mse(predicted: &[f64], expected: &[f64]) -> f64 {
    let sum: f64 = predicted.iter().zip(expected).map(|(p, y)| (p - y) * (p - y)).sum();
    sum / width(predicted)
}

pub fn mse_gradient(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
    let n = width(predicted);
    predicted.iter().zip(expected).map(|(p, y)| 2.0 * (p - y) / n).collect()
}

/// -mean(y·ln(p) + (1 - y)·ln(1 - p)) over independent sigmoid outputs.
pub fn binary_cross_entropy(predicted: &[f64], expected: &[f64]) -> f64 {
    let sum: f64 = predicted.iter().zip(expected)
        .map(|(p, y)| y * (p + EPS).ln() + (1.0 - y) * (1.0 - p + EPS).ln())
        .sum();
    -sum / width(predicted)
}

pub fn binary_cross_entropy_gradient(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
    let n = width(predicted);
    predicted.iter().zip(expected)
        .map(|(p, y)| (p - y) / (n * (p + EPS) * (1.0 - p + EPS)))
        .collect()
}

/// -Σ y·ln(p) over a softmax distribution.
pub fn cross_entropy(predicted: &[f64], expected: &[f64]) -> f64 {
    -predicted.iter().zip(expected).map(|(p, y)| y * (p + EPS).ln()).sum::<f64>()
}

/// Gradient with respect to the softmax logits, `p - y`. The output layer
/// must then treat its activation derivative as 1.
pub fn cross_entropy_gradient(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
    predicted.iter().zip(expected).map(|(p, y)| p - y).collect()
}
