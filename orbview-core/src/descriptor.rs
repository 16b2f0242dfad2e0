//! Shape descriptor parser: `cube`, `sphere(0.5, 30, 30)`, `cone(1, 2, 16)`.
//!
//! Arguments are positional and trailing ones may be left out:
//! - `sphere(radius, latitude_bands, longitude_bands)`
//! - `cylinder(radius, height, radial_segments)`
//! - `cone(radius, height, radial_segments)`
//! - `cube`, `pyramid` take none

use nom::{
    character::complete::{alpha1, char, multispace0},
    combinator::{all_consuming, opt},
    multi::separated_list0,
    number::complete::float,
    sequence::{delimited, pair},
    IResult,
};

use crate::error::DescriptorError;
use crate::primitives::{Shape, ShapeKind};

/// Parse and validate a shape descriptor.
pub fn parse_shape(input: &str) -> Result<Shape, DescriptorError> {
    let (name, args) = match parse_descriptor(input) {
        Ok((_, parsed)) => parsed,
        Err(_) => {
            return Err(DescriptorError::Syntax {
                input: input.to_string(),
            })
        }
    };

    let kind =
        ShapeKind::from_name(name).ok_or_else(|| DescriptorError::UnknownShape(name.to_string()))?;
    let args = args.unwrap_or_default();
    let shape = apply_arguments(Shape::default_for(kind), &args)?;
    shape.validate()?;
    Ok(shape)
}

fn parse_descriptor(input: &str) -> IResult<&str, (&str, Option<Vec<f32>>)> {
    all_consuming(pair(
        delimited(multispace0, alpha1, multispace0),
        opt(parse_arguments),
    ))(input)
}

fn parse_arguments(input: &str) -> IResult<&str, Vec<f32>> {
    let (input, _) = char('(')(input)?;
    let (input, args) = separated_list0(
        delimited(multispace0, char(','), multispace0),
        delimited(multispace0, float, multispace0),
    )(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, args))
}

fn apply_arguments(shape: Shape, args: &[f32]) -> Result<Shape, DescriptorError> {
    let kind = shape.kind();
    let max = match kind {
        ShapeKind::Cube | ShapeKind::Pyramid => 0,
        ShapeKind::Sphere | ShapeKind::Cylinder | ShapeKind::Cone => 3,
    };
    if args.len() > max {
        return Err(DescriptorError::Arity {
            shape: kind,
            max,
            found: args.len(),
        });
    }

    let shape = match shape {
        Shape::Sphere {
            radius,
            latitude_bands,
            longitude_bands,
        } => Shape::Sphere {
            radius: args.first().copied().unwrap_or(radius),
            latitude_bands: count_arg(kind, "latitude bands", args.get(1), latitude_bands)?,
            longitude_bands: count_arg(kind, "longitude bands", args.get(2), longitude_bands)?,
        },
        Shape::Cylinder {
            radius,
            height,
            radial_segments,
        } => Shape::Cylinder {
            radius: args.first().copied().unwrap_or(radius),
            height: args.get(1).copied().unwrap_or(height),
            radial_segments: count_arg(kind, "radial segments", args.get(2), radial_segments)?,
        },
        Shape::Cone {
            radius,
            height,
            radial_segments,
        } => Shape::Cone {
            radius: args.first().copied().unwrap_or(radius),
            height: args.get(1).copied().unwrap_or(height),
            radial_segments: count_arg(kind, "radial segments", args.get(2), radial_segments)?,
        },
        Shape::Cube | Shape::Pyramid => shape,
    };
    Ok(shape)
}

fn count_arg(
    shape: ShapeKind,
    parameter: &'static str,
    value: Option<&f32>,
    default: u32,
) -> Result<u32, DescriptorError> {
    let Some(&value) = value else {
        return Ok(default);
    };
    if value.fract() != 0.0 || !(0.0..=u32::MAX as f32).contains(&value) {
        return Err(DescriptorError::NotAnInteger {
            shape,
            parameter,
            value,
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_HEIGHT, DEFAULT_RADIAL_SEGMENTS};
    use crate::error::MeshError;

    #[test]
    fn test_bare_names() {
        assert_eq!(parse_shape("cube"), Ok(Shape::Cube));
        assert_eq!(parse_shape("  Pyramid "), Ok(Shape::Pyramid));
        assert_eq!(parse_shape("pyramid()"), Ok(Shape::Pyramid));
        assert_eq!(
            parse_shape("sphere"),
            Ok(Shape::default_for(ShapeKind::Sphere))
        );
    }

    #[test]
    fn test_full_arguments() {
        assert_eq!(
            parse_shape("sphere(0.5, 2, 4)"),
            Ok(Shape::Sphere {
                radius: 0.5,
                latitude_bands: 2,
                longitude_bands: 4
            })
        );
        assert_eq!(
            "cylinder( 1.5 ,3,12 )".parse::<Shape>(),
            Ok(Shape::Cylinder {
                radius: 1.5,
                height: 3.0,
                radial_segments: 12
            })
        );
    }

    #[test]
    fn test_trailing_defaults() {
        assert_eq!(
            parse_shape("cone(2)"),
            Ok(Shape::Cone {
                radius: 2.0,
                height: DEFAULT_HEIGHT,
                radial_segments: DEFAULT_RADIAL_SEGMENTS
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_shape("sphere(0.5, 2"),
            Err(DescriptorError::Syntax { .. })
        ));
        assert!(matches!(
            parse_shape("sphere 0.5"),
            Err(DescriptorError::Syntax { .. })
        ));
        assert_eq!(
            parse_shape("torus(1, 2)"),
            Err(DescriptorError::UnknownShape("torus".to_string()))
        );
        assert_eq!(
            parse_shape("cube(1)"),
            Err(DescriptorError::Arity {
                shape: ShapeKind::Cube,
                max: 0,
                found: 1
            })
        );
        assert!(matches!(
            parse_shape("cone(1, 1, 7.5)"),
            Err(DescriptorError::NotAnInteger { value, .. }) if value == 7.5
        ));
        assert!(matches!(
            parse_shape("cylinder(1, 1, 2)"),
            Err(DescriptorError::Mesh(MeshError::TooFewSegments { .. }))
        ));
        assert!(matches!(
            parse_shape("sphere(-1)"),
            Err(DescriptorError::Mesh(MeshError::NonPositive { .. }))
        ));
    }
}
