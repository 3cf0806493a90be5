//! Sexagesimal position strings from the curated deep-sky list.
//!
//! Right ascension is written `"<h>h <m>m"` (e.g. `"5h 35.4m"`), declination
//! `"<sign><d>d <m>'"` (e.g. `"-5d 27'"`). The declination sign is kept apart
//! from the degree magnitude so that `"-0d 30'"` stays negative.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(&self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightAscension {
    pub hours: u32,
    pub minutes: f64,
}

impl RightAscension {
    /// # Examples
    ///
    /// ```
    /// use skychart_etl::parsing::sexagesimal::RightAscension;
    ///
    /// let ra = RightAscension::parse("5h 35.4m").unwrap();
    /// assert_eq!(ra.hours, 5);
    /// assert!((ra.decimal_hours() - 5.59).abs() < 1e-12);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (hours, minutes) = raw
            .trim()
            .split_once('h')
            .ok_or_else(|| "missing 'h' separator".to_string())?;

        let hours = hours
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("hours {:?} is not an integer", hours.trim()))?;
        if hours >= 24 {
            return Err(format!("hours {} out of range 0-23", hours));
        }

        let minutes = parse_minutes(minutes, 'm')?;

        Ok(Self { hours, minutes })
    }

    pub fn decimal_hours(&self) -> f64 {
        f64::from(self.hours) + self.minutes / 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declination {
    pub sign: Sign,
    pub degrees: u32,
    pub minutes: f64,
}

impl Declination {
    /// # Examples
    ///
    /// ```
    /// use skychart_etl::parsing::sexagesimal::{Declination, Sign};
    ///
    /// let dec = Declination::parse("-0d 30'").unwrap();
    /// assert_eq!(dec.sign, Sign::Negative);
    /// assert_eq!(dec.decimal_degrees(), -0.5);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let (sign, unsigned) = if let Some(rest) = raw.strip_prefix('-') {
            (Sign::Negative, rest)
        } else if let Some(rest) = raw.strip_prefix('+') {
            (Sign::Positive, rest)
        } else {
            (Sign::Positive, raw)
        };

        let (degrees, minutes) = unsigned
            .split_once('d')
            .ok_or_else(|| "missing 'd' separator".to_string())?;

        let degrees = degrees
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("degrees {:?} is not an unsigned integer", degrees.trim()))?;
        if degrees > 90 {
            return Err(format!("degrees {} out of range 0-90", degrees));
        }

        let minutes = parse_minutes(minutes, '\'')?;

        Ok(Self {
            sign,
            degrees,
            minutes,
        })
    }

    /// Signed decimal degrees. A zero magnitude is always `+0.0`.
    pub fn decimal_degrees(&self) -> f64 {
        let magnitude = f64::from(self.degrees) + self.minutes / 60.0;
        if magnitude == 0.0 {
            0.0
        } else {
            self.sign.factor() * magnitude
        }
    }
}

fn parse_minutes(field: &str, unit: char) -> Result<f64, String> {
    let field = field.trim();
    let number = field
        .strip_suffix(unit)
        .ok_or_else(|| format!("minutes {:?} missing '{}' suffix", field, unit))?
        .trim();
    let minutes = number
        .parse::<f64>()
        .map_err(|_| format!("minutes {:?} is not a number", number))?;
    if !(0.0..60.0).contains(&minutes) {
        return Err(format!("minutes {} out of range 0-60", minutes));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_zero_degrees_keeps_sign() {
        assert_eq!(Declination::parse("-0d 30'").unwrap().decimal_degrees(), -0.5);
        assert_eq!(Declination::parse("+0d 30'").unwrap().decimal_degrees(), 0.5);
    }

    #[test]
    fn test_sign_applies_to_whole_magnitude() {
        let dec = Declination::parse("-5d 27'").unwrap();
        assert!((dec.decimal_degrees() - (-5.45)).abs() < 1e-12);
    }

    #[test]
    fn test_unsigned_declination_is_positive() {
        let dec = Declination::parse("41d 16'").unwrap();
        assert_eq!(dec.sign, Sign::Positive);
        assert!((dec.decimal_degrees() - (41.0 + 16.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_declination_is_positive_zero() {
        let value = Declination::parse("-0d 0'").unwrap().decimal_degrees();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_right_ascension() {
        let ra = RightAscension::parse("0h 42.7m").unwrap();
        assert!((ra.decimal_hours() - (42.7 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_strings() {
        assert!(RightAscension::parse("5 35.4m").is_err());
        assert!(RightAscension::parse("5h 35.4").is_err());
        assert!(RightAscension::parse("25h 0m").is_err());
        assert!(RightAscension::parse("xh 1m").is_err());
        assert!(Declination::parse("-5 27'").is_err());
        assert!(Declination::parse("-5d 27").is_err());
        assert!(Declination::parse("--5d 27'").is_err());
        assert!(Declination::parse("-5d 75'").is_err());
    }
}
