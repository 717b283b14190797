//! Nice tick generation on a 1-2-5 ladder.
//!
//! Used both for axis labels and for the histogram thresholds, so the bucket
//! edges always land on round salary values.

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = 1.414_213_562_373_095_1; // sqrt(2)

/// Signed tick increment for roughly `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results `-k` encode a
/// fractional step `1 / k`, which keeps sub-unit ticks exact when multiplied
/// back out. Returns `0.0` when no sensible step exists.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return 0.0;
    }
    let step = (stop - start) / count as f64;
    if step <= 0.0 || !step.is_finite() {
        return 0.0;
    }

    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Absolute step between ticks for `[start, stop]`, in either direction.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (low, high) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let increment = tick_increment(low, high, count);
    if increment > 0.0 {
        increment
    } else if increment < 0.0 {
        1.0 / -increment
    } else {
        0.0
    }
}

/// Round tick values covering `[start, stop]`, ordered like the inputs.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let increment = tick_increment(low, high, count);
    if increment == 0.0 {
        return Vec::new();
    }

    let mut values: Vec<f64> = if increment > 0.0 {
        let first = (low / increment).ceil() as i64;
        let last = (high / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = -increment;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if reverse {
        values.reverse();
    }
    values
}

/// Extends `[start, stop]` outward to round tick boundaries.
///
/// Iterates until the step stabilizes, mirroring how a nice domain is usually
/// computed for linear axes.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let reverse = stop < start;
    let (mut low, mut high) = if reverse { (stop, start) } else { (start, stop) };
    let mut previous_step = f64::NAN;

    for _ in 0..10 {
        let step = tick_increment(low, high, count);
        if step == previous_step {
            break;
        }
        if step > 0.0 {
            low = (low / step).floor() * step;
            high = (high / step).ceil() * step;
        } else if step < 0.0 {
            low = (low * step).ceil() / step;
            high = (high * step).floor() / step;
        } else {
            break;
        }
        previous_step = step;
    }

    if reverse { (high, low) } else { (low, high) }
}

/// Formats a tick value with the precision implied by `step` and thousands
/// separators on the integer part, e.g. `50,000` or `0.25`.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let decimals = if step.is_finite() && step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    group_thousands(&format!("{value:.decimals$}"))
}

/// Formats a value as a plain integer without grouping (year axes).
#[must_use]
pub fn format_integer(value: f64) -> String {
    format!("{:.0}", value.round())
}

fn group_thousands(raw: &str) -> String {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0" reads oddly on an axis.
    let sign = if grouped.chars().all(|c| c == '0' || c == ',')
        && fraction.is_none_or(|f| f.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
