//! Profile update engine.
//!
//! Recomputes the forward predictions of a profile from its raw facts. The
//! averages are inputs here, not outputs: callers that change the cycle
//! history refresh them first with [`refresh_averages`].

use crate::prediction::{
    calculate_average_cycle_length, calculate_average_period_length, calculate_fertile_window,
    predict_next_period, predict_ovulation,
};
use crate::UserProfile;

/// Recompute next period, ovulation and fertile window.
///
/// Without a `last_period_start` there is nothing to anchor a prediction on,
/// so all three derived fields are left empty.
pub fn update_predictions(profile: UserProfile) -> UserProfile {
    let mut updated = profile;

    let Some(last_start) = updated.last_period_start else {
        updated.next_period_prediction = None;
        updated.ovulation_prediction = None;
        updated.fertile_days = None;
        return updated;
    };

    let next_period = predict_next_period(last_start, updated.average_cycle_length);
    let ovulation = predict_ovulation(next_period);
    let fertile = calculate_fertile_window(ovulation);

    updated.next_period_prediction = Some(next_period);
    updated.ovulation_prediction = Some(ovulation);
    updated.fertile_days = Some(fertile);

    tracing::debug!(
        "Predicted next period {}, ovulation {}, fertile {}..{}",
        next_period,
        ovulation,
        fertile.start,
        fertile.end
    );

    updated
}

/// Recompute both averages from the cycle history
pub fn refresh_averages(profile: &mut UserProfile) {
    profile.average_cycle_length = calculate_average_cycle_length(&profile.cycle_history);
    profile.average_period_length = calculate_average_period_length(&profile.cycle_history);
}
