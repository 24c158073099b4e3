/// Root-mean-squared error between true values and estimates
///
/// **Panics** if the slices differ in length or are empty
pub fn rmse(actual: &[f64], estimated: &[f64]) -> f64 {
    assert_eq!(
        actual.len(),
        estimated.len(),
        "`actual` and `estimated` must have the same length"
    );
    assert!(!actual.is_empty(), "`actual` is not empty");

    let mse = actual
        .iter()
        .zip(estimated)
        .map(|(a, e)| (a - e).powi(2))
        .sum::<f64>()
        / actual.len() as f64;
    mse.sqrt()
}
