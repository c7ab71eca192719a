/// STL mesh loading, binary and ASCII
use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::preceded,
    IResult,
};
use thiserror::Error;

use crate::geometry::{Mesh, Triangle};

/// Errors produced while parsing an STL file.
#[derive(Debug, Error)]
pub enum StlError {
    #[error("file too short for an STL header ({len} bytes)")]
    TooShort { len: usize },
    #[error("binary STL truncated after {parsed} of {expected} facets")]
    Truncated { expected: usize, parsed: usize },
    #[error("malformed ASCII STL near offset {offset}")]
    Ascii { offset: usize },
}

/// Parse an STL file, picking the format from the leading bytes.
///
/// Files opening with `solid` are tried as ASCII first; binary files with
/// a header that happens to start with `solid` still load via the
/// fallback.
pub fn parse_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }
    parse_binary_stl(data)
}

/// Parse a binary STL file: 80-byte header, facet count, 50-byte facets.
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, StlError> {
    let (body, expected) = match binary_header(data) {
        Ok((body, n)) => (body, n as usize),
        Err(_) => return Err(StlError::TooShort { len: data.len() }),
    };

    let mut mesh = Mesh::with_capacity(expected);
    let mut input = body;
    for parsed in 0..expected {
        match binary_facet(input) {
            Ok((rest, triangle)) => {
                mesh.add_triangle(triangle);
                input = rest;
            }
            Err(_) => return Err(StlError::Truncated { expected, parsed }),
        }
    }
    Ok(mesh)
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    let (input, _header) = take(80usize)(input)?;
    le_u32(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, normal) = le_vector3(input)?;
    let (input, a) = le_point3(input)?;
    let (input, b) = le_point3(input)?;
    let (input, c) = le_point3(input)?;
    let (input, _attribute_bytes) = le_u16(input)?;
    Ok((input, Triangle::new(normal, [a, b, c])))
}

fn le_vector3(input: &[u8]) -> IResult<&[u8], Vector3<f32>> {
    let (input, x) = le_f32(input)?;
    let (input, y) = le_f32(input)?;
    let (input, z) = le_f32(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn le_point3(input: &[u8]) -> IResult<&[u8], Point3<f32>> {
    let (input, v) = le_vector3(input)?;
    Ok((input, Point3::from(v)))
}

/// Parse an ASCII STL file (`solid` ... `endsolid`, optionally named).
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    match ascii_mesh(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(err) => {
            let remaining = match &err {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input.len(),
                nom::Err::Incomplete(_) => 0,
            };
            Err(StlError::Ascii {
                offset: input.len() - remaining,
            })
        }
    }
}

fn ascii_mesh(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, triangles) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut mesh = Mesh::with_capacity(triangles.len());
    for triangle in triangles {
        mesh.add_triangle(triangle);
    }
    Ok((input, mesh))
}

fn ascii_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, Triangle::new(normal, [a, b, c])))
}

fn ascii_vertex(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, v) = vector3(input)?;
    Ok((input, Point3::from(v)))
}

fn vector3(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, Vector3::new(x, y, z)))
}
