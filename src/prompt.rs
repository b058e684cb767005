//! Interactive collection of the two places and the distance unit.
//!
//! Both prompts loop until they get a usable answer. End of input is an
//! `UnexpectedEof` error so a closed stdin never spins forever.

use std::io::{self, BufRead, Write};

use crate::geodesy::DistanceUnit;
use crate::location::{Geocoder, LocationError, ResolvedLocation};

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Ask for "Location N" until the geocoder finds it. Returns the text as typed
/// alongside the resolved place.
pub fn ask_location<R, W, G>(
    input: &mut R,
    output: &mut W,
    geocoder: &mut G,
    number: usize,
) -> io::Result<(String, ResolvedLocation)>
where
    R: BufRead,
    W: Write,
    G: Geocoder + ?Sized,
{
    loop {
        write!(output, "Location {}: ", number)?;
        output.flush()?;
        let query = read_answer(input)?;
        if query.is_empty() {
            continue;
        }

        match geocoder.resolve(&query) {
            Ok(loc) => {
                writeln!(
                    output,
                    " -> Location {}: '{}' - ({}, {})",
                    number, query, loc.lat, loc.lon
                )?;
                return Ok((query, loc));
            }
            Err(LocationError::NotFound(_)) => {
                writeln!(output, "Could not find '{}'. Try again.", query)?;
            }
            Err(e) => {
                writeln!(output, "{} Try again.", e)?;
            }
        }
    }
}

/// Ask for a unit among the short symbols; an empty answer picks the default.
pub fn ask_unit<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: DistanceUnit,
) -> io::Result<DistanceUnit> {
    let choices = DistanceUnit::ALL
        .iter()
        .map(|u| u.symbol())
        .collect::<Vec<_>>()
        .join("/");

    loop {
        write!(output, "Choose units [{}] ({}): ", choices, default)?;
        output.flush()?;
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(default);
        }
        // only the offered symbols are accepted here
        match DistanceUnit::ALL.iter().find(|u| u.symbol() == answer) {
            Some(unit) => return Ok(*unit),
            None => writeln!(output, "Please select one of the available options")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationResolver;
    use std::io::Cursor;

    fn offline() -> LocationResolver {
        let mut r = LocationResolver::new();
        r.set_offline(true);
        r
    }

    #[test]
    fn test_ask_location_retries_until_found() {
        let mut input = Cursor::new("atlantis\n\nLondon\n");
        let mut output = Vec::new();
        let (typed, loc) = ask_location(&mut input, &mut output, &mut offline(), 1).unwrap();

        assert_eq!(typed, "London");
        assert_eq!(loc.name, "london");
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Could not find 'atlantis'. Try again."));
        assert!(out.contains(" -> Location 1: 'London' - (51.5074, -0.1278)"));
        assert_eq!(out.matches("Location 1: ").count(), 4);
    }

    #[test]
    fn test_ask_location_bad_coordinates() {
        let mut input = Cursor::new("100, 0\n0, 0\n");
        let mut output = Vec::new();
        let (_, loc) = ask_location(&mut input, &mut output, &mut offline(), 2).unwrap();
        assert_eq!(loc.lat, 0.0);
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Invalid coordinate"));
    }

    #[test]
    fn test_ask_location_eof() {
        let mut input = Cursor::new("atlantis\n");
        let mut output = Vec::new();
        let err = ask_location(&mut input, &mut output, &mut offline(), 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_ask_unit_default() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        let unit = ask_unit(&mut input, &mut output, DistanceUnit::Kilometers).unwrap();
        assert_eq!(unit, DistanceUnit::Kilometers);
        assert_eq!(String::from_utf8(output).unwrap(), "Choose units [km/ft/m/mi] (km): ");
    }

    #[test]
    fn test_ask_unit_reprompts() {
        let mut input = Cursor::new("furlongs\nmi\n");
        let mut output = Vec::new();
        let unit = ask_unit(&mut input, &mut output, DistanceUnit::Kilometers).unwrap();
        assert_eq!(unit, DistanceUnit::Miles);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Please select one of the available options"));
    }
}
