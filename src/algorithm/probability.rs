//! Hybrid admission-probability model.
//!
//! Blends a logistic curve centred on the middle of the opening/closing rank
//! window with a hand-tuned piecewise curve. Output is a percentage rounded
//! to two decimals.

/// Logistic component: 100 / (1 + e^((rank - M) / S)).
fn logistic(rank: f64, opening: f64, closing: f64) -> f64 {
    let mid = (opening + closing) / 2.0;
    let mut spread = (closing - opening) / 10.0;
    if spread == 0.0 {
        spread = 1.0;
    }
    100.0 / (1.0 + ((rank - mid) / spread).exp())
}

fn piecewise(rank: f64, opening: f64, closing: f64) -> f64 {
    if rank < opening {
        let improvement = (opening - rank) / opening;
        if improvement >= 0.5 {
            99.0
        } else {
            96.0 + improvement * 6.0
        }
    } else if rank == opening {
        95.0
    } else if rank < closing {
        let position = (rank - opening) / (closing - opening);
        if position <= 0.2 {
            94.0 - position * 70.0
        } else if position <= 0.5 {
            80.0 - ((position - 0.2) / 0.3) * 20.0
        } else if position <= 0.8 {
            60.0 - ((position - 0.5) / 0.3) * 20.0
        } else {
            40.0 - ((position - 0.8) / 0.2) * 20.0
        }
    } else if rank == closing {
        15.0
    } else if rank <= closing + 10.0 {
        5.0
    } else {
        0.0
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Probability (0-100) of admission for `rank` given a program's opening and
/// closing ranks. Degenerate inputs that produce a non-finite value yield 0.
pub fn admission_probability(rank: f64, opening: f64, closing: f64) -> f64 {
    let logistic_prob = logistic(rank, opening, closing);
    let piece = piecewise(rank, opening, closing);

    let blended = if rank < opening {
        let improvement = (opening - rank) / opening;
        if improvement > 0.5 {
            logistic_prob.max(95.0)
        } else {
            logistic_prob * 0.4 + piece * 0.6
        }
    } else if rank <= closing {
        logistic_prob * 0.7 + piece * 0.3
    } else if rank > closing + 100.0 {
        0.0
    } else {
        logistic_prob.min(5.0)
    };

    if blended.is_finite() { round2(blended) } else { 0.0 }
}
