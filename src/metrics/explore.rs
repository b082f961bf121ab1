use crate::data::Series;
use statrs::statistics::Statistics;

//lagged daily return used for the distribution diagnostic:
//(close[t-1] / close[t]) - 1, one value per day after the first
pub fn daily_lag_returns(series: &Series) -> Vec<f64> {
    series
        .closes()
        .windows(2)
        .map(|pair| (pair[0] / pair[1]) - 1.0)
        .collect()
}

//sample excess kurtosis with bias correction, the same estimator a
//pandas kurtosis() call reports; None when fewer than four observations
//or the sample has no spread
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }

    let nf = n as f64;
    let mean = values.mean();
    let s = values.std_dev();

    if s == 0.0 || !s.is_finite() {
        return None;
    }

    let m4: f64 = values.iter().map(|v| ((v - mean) / s).powi(4)).sum();

    let term = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let correction = 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));

    Some(term * m4 - correction)
}
