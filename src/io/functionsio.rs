use std::io::{
    BufRead,
    Read,
    Write
};

use serde::{
    Deserialize,
    Serialize
};

use crate::function::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use crate::function::point::Point;
use crate::function::tabulatedfunction::TabulatedFunction;
use crate::function::tabulatedfunctionerror::{
    TabulatedFunctionError,
    TabulatedResult
};

// ─────────────────────────────────────────────────────────────────────────────
// Wire layouts
// ─────────────────────────────────────────────────────────────────────────────
//
//   text   : "<count>\n" then "<x> <y>\n" per sample, six decimals
//   binary : i32 count, then f64 x, f64 y per sample, all big-endian
//   json   : { "points": [ { "x": .., "y": .. }, .. ] }
//
// Readers never build a store themselves: the pairs go through the caller's
// factory, which re-validates length and ordering.

/// Upper bound on points reserved up front from an untrusted count field.
const PREALLOCATION_LIMIT: usize = 4096;

#[derive(Serialize, Deserialize)]
struct TabulatedFunctionJsonProp {
    points: Vec<Point>
}

fn parse_error(message: String) -> TabulatedFunctionError {
    TabulatedFunctionError::Parse(message)
}

fn create_from_points(points: &[Point],
                      factory: &dyn TabulatedFunctionFactory) -> TabulatedResult<Box<dyn TabulatedFunction>> {
    let x_values: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
    let y_values: Vec<f64> = points.iter().map(|pt| pt.y()).collect();
    factory.create(&x_values, &y_values)
}

// ── text ────────────────────────────────────────────────────────────────────

pub fn write_text<W, T>(writer: &mut W, function: &T) -> TabulatedResult<()>
where
    W: Write,
    T: TabulatedFunction + ?Sized,
{
    let points = function.points();
    writeln!(writer, "{}", points.len())?;
    for pt in points {
        writeln!(writer, "{:.6} {:.6}", pt.x(), pt.y())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_text<R>(reader: R,
                    factory: &dyn TabulatedFunctionFactory) -> TabulatedResult<Box<dyn TabulatedFunction>>
where
    R: BufRead,
{
    let mut lines = reader.lines();
    let count_line = lines.next()
        .ok_or_else(|| parse_error("missing point count".to_owned()))??;
    let count: usize = count_line.trim()
        .parse()
        .map_err(|error| parse_error(format!("invalid point count '{}': {}", count_line.trim(), error)))?;

    let mut points = Vec::with_capacity(count.min(PREALLOCATION_LIMIT));
    for index in 0..count {
        let line = lines.next()
            .ok_or_else(|| parse_error(format!("expected {} points, found {}", count, index)))??;
        let mut fields = line.split_whitespace();
        let x = parse_coordinate(fields.next(), index)?;
        let y = parse_coordinate(fields.next(), index)?;
        points.push(Point::new(x, y));
    }
    create_from_points(&points, factory)
}

fn parse_coordinate(field: Option<&str>, index: usize) -> TabulatedResult<f64> {
    let field = field.ok_or_else(|| parse_error(format!("point {} has fewer than two values", index)))?;
    // six-decimal text written under a comma-decimal locale
    field.replace(',', ".")
        .parse()
        .map_err(|error| parse_error(format!("point {}: invalid number '{}': {}", index, field, error)))
}

// ── binary ──────────────────────────────────────────────────────────────────

pub fn write_binary<W, T>(writer: &mut W, function: &T) -> TabulatedResult<()>
where
    W: Write,
    T: TabulatedFunction + ?Sized,
{
    let points = function.points();
    let count = i32::try_from(points.len())
        .map_err(|_| parse_error(format!("{} points do not fit the binary count field", points.len())))?;
    writer.write_all(&count.to_be_bytes())?;
    for pt in points {
        writer.write_all(&pt.x().to_be_bytes())?;
        writer.write_all(&pt.y().to_be_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_binary<R>(mut reader: R,
                      factory: &dyn TabulatedFunctionFactory) -> TabulatedResult<Box<dyn TabulatedFunction>>
where
    R: Read,
{
    let mut count_bytes = [0u8; 4];
    reader.read_exact(&mut count_bytes)?;
    let count = i32::from_be_bytes(count_bytes);
    let count = usize::try_from(count)
        .map_err(|_| parse_error(format!("negative point count {}", count)))?;

    let mut points = Vec::with_capacity(count.min(PREALLOCATION_LIMIT));
    let mut value_bytes = [0u8; 8];
    for _ in 0..count {
        reader.read_exact(&mut value_bytes)?;
        let x = f64::from_be_bytes(value_bytes);
        reader.read_exact(&mut value_bytes)?;
        let y = f64::from_be_bytes(value_bytes);
        points.push(Point::new(x, y));
    }
    create_from_points(&points, factory)
}

// ── json ────────────────────────────────────────────────────────────────────

pub fn write_json<W, T>(writer: W, function: &T) -> TabulatedResult<()>
where
    W: Write,
    T: TabulatedFunction + ?Sized,
{
    let json_prop = TabulatedFunctionJsonProp { points: function.points() };
    serde_json::to_writer_pretty(writer, &json_prop)?;
    Ok(())
}

pub fn read_json<R>(reader: R,
                    factory: &dyn TabulatedFunctionFactory) -> TabulatedResult<Box<dyn TabulatedFunction>>
where
    R: Read,
{
    let json_prop: TabulatedFunctionJsonProp = serde_json::from_reader(reader)?;
    create_from_points(&json_prop.points, factory)
}
