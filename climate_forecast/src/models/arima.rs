//! ARIMA models for time series forecasting
//!
//! Estimation minimises the conditional sum of squares of the differenced
//! series. AR coefficients start from the Yule-Walker solution, MA
//! coefficients from zero. Both are optimised in an unconstrained space and
//! mapped back through partial autocorrelations, so every candidate AR
//! polynomial is stationary and every MA polynomial invertible.
//!
//! When `d > 0` the model has no constant term, otherwise the sample mean is
//! removed before fitting and added back to forecasts.

use crate::config::{ArimaOrder, NelderMeadConfig};
use crate::data::HistoricalSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::optimize::nelder_mead;
use tracing::{debug, info};

/// Largest partial autocorrelation used for starting values
const MAX_START_PACF: f64 = 0.95;

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    order: ArimaOrder,
    optimizer: NelderMeadConfig,
}

/// Trained ARIMA model
#[derive(Debug, Clone)]
pub struct TrainedArimaModel {
    /// Name of the model
    name: String,
    order: ArimaOrder,
    /// Fitted AR coefficients (phi_1..phi_p)
    ar_coefficients: Vec<f64>,
    /// Fitted MA coefficients (theta_1..theta_q)
    ma_coefficients: Vec<f64>,
    /// Mean removed before fitting; zero when d > 0
    mean: f64,
    /// Last value of each differencing level 0..d, used to integrate forecasts
    level_tails: Vec<f64>,
    /// Differenced, demeaned training series
    differenced: Vec<f64>,
    /// Residuals of the differenced series
    residuals: Vec<f64>,
    /// Residual variance
    sigma2: f64,
    iterations: usize,
}

impl ArimaModel {
    /// Create a new ARIMA model
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            name: order.to_string(),
            order,
            optimizer: NelderMeadConfig::default(),
        }
    }

    /// Use a different optimizer configuration
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Fit the model to a plain sequence of observations
    pub fn fit(&self, values: &[f64]) -> Result<TrainedArimaModel> {
        let ArimaOrder { p, d, q } = self.order;

        let required = self.order.min_observations();
        if values.len() < required {
            return Err(ForecastError::InsufficientData {
                model: self.name.clone(),
                required,
                actual: values.len(),
            });
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFitError(format!(
                "Observation {} is not finite ({})",
                pos, values[pos]
            )));
        }

        let mut level_tails = Vec::with_capacity(d);
        let mut level = values.to_vec();
        for _ in 0..d {
            level_tails.push(level[level.len() - 1]);
            level = difference(&level);
        }

        let mean = if d == 0 { mean(&level) } else { 0.0 };
        let differenced: Vec<f64> = level.iter().map(|v| v - mean).collect();

        let start_pacf = yule_walker_pacf(&differenced, p);
        let mut start: Vec<f64> = start_pacf
            .iter()
            .map(|r| unconstrain(r.clamp(-MAX_START_PACF, MAX_START_PACF)))
            .collect();
        start.extend(std::iter::repeat(0.0).take(q));
        debug!(model = %self.name, ?start_pacf, "starting values");

        let objective = |params: &[f64]| {
            let (ar, ma) = split_params(params, p);
            sum_of_squares(&conditional_residuals(&differenced, &ar, &ma), p)
        };
        let result = nelder_mead(objective, &start, self.optimizer);

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFitError(format!(
                "{} did not reach a finite sum of squares",
                self.name
            )));
        }

        let (ar_coefficients, ma_coefficients) = split_params(&result.optimal_point, p);
        let residuals = conditional_residuals(&differenced, &ar_coefficients, &ma_coefficients);
        let sigma2 = sum_of_squares(&residuals, p) / (differenced.len() - p) as f64;

        info!(
            model = %self.name,
            observations = values.len(),
            iterations = result.iterations,
            converged = result.converged,
            sigma2,
            "fitted model"
        );
        debug!(?ar_coefficients, ?ma_coefficients, "fitted coefficients");

        Ok(TrainedArimaModel {
            name: self.name.clone(),
            order: self.order,
            ar_coefficients,
            ma_coefficients,
            mean,
            level_tails,
            differenced,
            residuals,
            sigma2,
            iterations: result.iterations,
        })
    }
}

impl Default for ArimaModel {
    fn default() -> Self {
        Self::new(ArimaOrder::default())
    }
}

impl ForecastModel for ArimaModel {
    type Trained = TrainedArimaModel;

    fn train(&self, data: &HistoricalSeries) -> Result<TrainedArimaModel> {
        self.fit(data.values())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedArimaModel {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        if horizon == 0 {
            return ForecastResult::new(Vec::new(), 0);
        }

        let n = self.differenced.len();
        let end = n.checked_add(horizon).ok_or_else(|| {
            ForecastError::ValidationError(format!("Horizon {} is too large", horizon))
        })?;
        let mut history = self.differenced.clone();
        let mut errors = self.residuals.clone();
        history
            .try_reserve(horizon)
            .and_then(|_| errors.try_reserve(horizon))
            .map_err(|e| {
                ForecastError::ValidationError(format!("Horizon {} is too large: {}", horizon, e))
            })?;

        for t in n..end {
            let next = one_step(&history, &errors, t, &self.ar_coefficients, &self.ma_coefficients);
            history.push(next);
            errors.push(0.0);
        }

        let mut forecasts: Vec<f64> = history[n..].iter().map(|v| v + self.mean).collect();
        for &tail in self.level_tails.iter().rev() {
            forecasts = integrate(&forecasts, tail);
        }

        ForecastResult::new(forecasts, horizon)
    }

    fn predict(&self, data: &HistoricalSeries) -> Result<ForecastResult> {
        let values = data.values();
        if values.is_empty() {
            return Err(ForecastError::DataError(
                "Empty time series data".to_string(),
            ));
        }

        let d = self.order.d;
        let mut level = values.to_vec();
        for _ in 0..d {
            level = difference(&level);
        }
        let centered: Vec<f64> = level.iter().map(|v| v - self.mean).collect();
        let residuals =
            conditional_residuals(&centered, &self.ar_coefficients, &self.ma_coefficients);

        // The one-step error of an integrated series equals the error of its
        // differences, so each prediction is the observation minus its residual
        let predictions: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, y)| match i.checked_sub(d) {
                Some(t) => y - residuals[t],
                None => *y,
            })
            .collect();

        let len = predictions.len();
        ForecastResult::new(predictions, len)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedArimaModel {
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coefficients
    }

    /// Residual variance of the fit
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Residuals on the differenced scale; the first `p` are zero
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Optimizer iterations spent fitting
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// First differences
fn difference(series: &[f64]) -> Vec<f64> {
    series.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Undo one differencing step, starting from the last observed level
fn integrate(differences: &[f64], last: f64) -> Vec<f64> {
    differences
        .iter()
        .scan(last, |level, d| {
            *level += d;
            Some(*level)
        })
        .collect()
}

/// Map an unconstrained real onto (-1, 1)
fn constrain(x: f64) -> f64 {
    x / (1.0 + x * x).sqrt()
}

/// Inverse of [`constrain`]
fn unconstrain(r: f64) -> f64 {
    r / (1.0 - r * r).sqrt()
}

/// Durbin-Levinson recursion from partial autocorrelations to the
/// coefficients of a stationary AR polynomial
fn pacf_to_coefficients(pacf: &[f64]) -> Vec<f64> {
    let mut phi: Vec<f64> = Vec::with_capacity(pacf.len());
    for (k, &kappa) in pacf.iter().enumerate() {
        let previous = phi.clone();
        for i in 0..k {
            phi[i] = previous[i] - kappa * previous[k - 1 - i];
        }
        phi.push(kappa);
    }
    phi
}

/// Partial autocorrelations of the Yule-Walker AR(p) fit (Levinson-Durbin)
fn yule_walker_pacf(series: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }

    let n = series.len();
    let m = mean(series);
    let centered: Vec<f64> = series.iter().map(|x| x - m).collect();
    let autocov: Vec<f64> = (0..=p)
        .map(|k| {
            if k >= n {
                return 0.0;
            }
            centered[k..]
                .iter()
                .zip(&centered[..n - k])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect();

    let mut pacf = vec![0.0; p];
    if autocov[0] <= f64::EPSILON {
        return pacf;
    }

    let mut phi: Vec<f64> = Vec::with_capacity(p);
    let mut variance = autocov[0];
    for k in 0..p {
        let acc = autocov[k + 1]
            - (0..k).map(|i| phi[i] * autocov[k - i]).sum::<f64>();
        let kappa = acc / variance;
        if !kappa.is_finite() || variance <= f64::EPSILON {
            break;
        }
        let previous = phi.clone();
        for i in 0..k {
            phi[i] = previous[i] - kappa * previous[k - 1 - i];
        }
        phi.push(kappa);
        pacf[k] = kappa;
        variance *= 1.0 - kappa * kappa;
    }

    pacf
}

/// Split optimizer parameters into (AR, MA) coefficients
fn split_params(params: &[f64], p: usize) -> (Vec<f64>, Vec<f64>) {
    let ar_pacf: Vec<f64> = params[..p].iter().map(|&x| constrain(x)).collect();
    let ma_pacf: Vec<f64> = params[p..].iter().map(|&x| constrain(x)).collect();

    let ar = pacf_to_coefficients(&ar_pacf);
    // 1 + theta(z) is invertible exactly when 1 - phi(z) with phi = -theta
    // is stationary
    let ma = pacf_to_coefficients(&ma_pacf)
        .into_iter()
        .map(|c| -c)
        .collect();
    (ar, ma)
}

/// Predicted value at position `t` from earlier values and errors
fn one_step(history: &[f64], errors: &[f64], t: usize, ar: &[f64], ma: &[f64]) -> f64 {
    let ar_part: f64 = ar
        .iter()
        .enumerate()
        .filter(|(i, _)| t > *i)
        .map(|(i, phi)| phi * history[t - 1 - i])
        .sum();
    let ma_part: f64 = ma
        .iter()
        .enumerate()
        .filter(|(j, _)| t > *j)
        .map(|(j, theta)| theta * errors[t - 1 - j])
        .sum();
    ar_part + ma_part
}

/// Residuals conditional on zero errors before the first `p` observations
fn conditional_residuals(series: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let p = ar.len();
    let mut errors = vec![0.0; series.len()];
    for t in p..series.len() {
        errors[t] = series[t] - one_step(series, &errors, t, ar, ma);
    }
    errors
}

fn sum_of_squares(residuals: &[f64], skip: usize) -> f64 {
    residuals.iter().skip(skip).map(|e| e * e).sum()
}
