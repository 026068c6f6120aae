//! Piece factory - static shape and color tables per tetromino kind.

use crate::error::{CoreError, Result};
use crate::piece::{Piece, Shape};
use crate::types::{Color, TetrominoKind};

const I_SHAPE: Shape = Shape::from_rows([
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 0, 0],
]);

const J_SHAPE: Shape = Shape::from_rows([[0, 1, 0], [0, 1, 0], [1, 1, 0]]);

const L_SHAPE: Shape = Shape::from_rows([[0, 1, 0], [0, 1, 0], [0, 1, 1]]);

const O_SHAPE: Shape = Shape::from_rows([[1, 1], [1, 1]]);

const T_SHAPE: Shape = Shape::from_rows([[0, 0, 0], [1, 1, 1], [0, 1, 0]]);

const S_SHAPE: Shape = Shape::from_rows([[0, 0, 0], [0, 1, 1], [1, 1, 0]]);

const Z_SHAPE: Shape = Shape::from_rows([[0, 0, 0], [1, 1, 0], [0, 1, 1]]);

/// Canonical spawn shape for a kind
pub fn shape_of(kind: TetrominoKind) -> Shape {
    match kind {
        TetrominoKind::I => I_SHAPE,
        TetrominoKind::J => J_SHAPE,
        TetrominoKind::L => L_SHAPE,
        TetrominoKind::O => O_SHAPE,
        TetrominoKind::T => T_SHAPE,
        TetrominoKind::S => S_SHAPE,
        TetrominoKind::Z => Z_SHAPE,
    }
}

/// Fill color for a kind
pub fn color_of(kind: TetrominoKind) -> Color {
    match kind {
        TetrominoKind::I => Color::rgb(0, 255, 255),
        TetrominoKind::J => Color::rgb(0, 0, 255),
        TetrominoKind::L => Color::rgb(255, 165, 0),
        TetrominoKind::O => Color::rgb(255, 255, 0),
        TetrominoKind::T => Color::rgb(128, 0, 128),
        TetrominoKind::S => Color::rgb(0, 255, 0),
        TetrominoKind::Z => Color::rgb(255, 0, 0),
    }
}

/// Build an unpositioned piece of the given kind
pub fn create_piece(kind: TetrominoKind) -> Piece {
    Piece::new(kind, shape_of(kind), color_of(kind))
}

/// Build a piece from a type tag such as `"T"`
pub fn create_piece_by_tag(tag: &str) -> Result<Piece> {
    TetrominoKind::from_str(tag)
        .map(create_piece)
        .ok_or_else(|| CoreError::InvalidPieceType(tag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in TetrominoKind::ALL {
            assert_eq!(shape_of(kind).filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_shape_sizes() {
        assert_eq!(shape_of(TetrominoKind::I).size(), 4);
        assert_eq!(shape_of(TetrominoKind::O).size(), 2);
        for kind in [
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::T,
            TetrominoKind::Z,
        ] {
            assert_eq!(shape_of(kind).size(), 3);
        }
    }

    #[test]
    fn test_o_rotation_is_noop() {
        let o = shape_of(TetrominoKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_create_piece_by_tag() {
        let piece = create_piece_by_tag("t").unwrap();
        assert_eq!(piece.kind, TetrominoKind::T);
        assert_eq!(piece.color, color_of(TetrominoKind::T));
        assert_eq!((piece.col, piece.row), (0, 0));
    }

    #[test]
    fn test_create_piece_by_unknown_tag() {
        let err = create_piece_by_tag("X").unwrap_err();
        assert_eq!(err, CoreError::InvalidPieceType("X".to_string()));
        assert_eq!(err.to_string(), "invalid piece type: \"X\"");
    }
}
