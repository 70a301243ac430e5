//! Sexagesimal coordinate conversions for tabular input.

/// Hours/minutes/seconds of right ascension to degrees.
pub fn hms_to_degrees(hours: f64, minutes: f64, seconds: f64) -> qtty::Degrees {
    qtty::Degrees::new((hours + minutes / 60.0 + seconds / 3600.0) * 15.0)
}

/// Sign and degrees/minutes/seconds of declination to degrees.
///
/// The sign is carried separately because a declination between 0 and -1
/// degree has a degrees component of zero, which cannot hold a sign of its
/// own.
pub fn dms_to_degrees(negative: bool, degrees: f64, minutes: f64, seconds: f64) -> qtty::Degrees {
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    qtty::Degrees::new(if negative { -magnitude } else { magnitude })
}
