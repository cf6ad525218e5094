//! Helper functions for indicator calculations

/// Apply an aggregate over a sliding window
///
/// The first `window - 1` outputs are NaN.
pub fn rolling<F>(data: &[f64], window: usize, func: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if data.len() < window || window == 0 {
        return vec![f64::NAN; data.len()];
    }

    let mut result = vec![f64::NAN; window - 1];
    for i in (window - 1)..data.len() {
        result.push(func(&data[(i + 1 - window)..=i]));
    }

    result
}

/// Arithmetic mean, NaN for empty input
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation
pub fn std_dev_pop(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }

    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Index of the first non-NaN value
pub fn first_valid(data: &[f64]) -> Option<usize> {
    data.iter().position(|x| !x.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling() {
        let sums = rolling(&[1.0, 2.0, 3.0, 4.0], 2, |w| w.iter().sum());
        assert!(sums[0].is_nan());
        assert_eq!(&sums[1..], &[3.0, 5.0, 7.0]);

        assert!(rolling(&[1.0, 2.0], 3, mean).iter().all(|x| x.is_nan()));
        assert!(rolling(&[1.0, 2.0], 0, mean).iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_std_dev_pop() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(std_dev_pop(&data), 2.0);
        assert!(std_dev_pop(&[]).is_nan());
    }

    #[test]
    fn test_first_valid() {
        assert_eq!(first_valid(&[f64::NAN, f64::NAN, 1.0]), Some(2));
        assert_eq!(first_valid(&[f64::NAN]), None);
    }
}
