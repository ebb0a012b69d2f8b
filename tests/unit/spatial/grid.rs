//! Tests for pixel grid storage, bounds checking and neighbourhood filtering

#[cfg(test)]
mod tests {
    use texture_critter::SynthesisError;
    use texture_critter::spatial::grid::{ChannelMode, PixelGrid};
    use texture_critter::spatial::shape::{NeighbourhoodShape, Offset};

    fn numbered_rgb(width: usize, height: usize) -> PixelGrid {
        let bytes: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        PixelGrid::from_raw(width, height, ChannelMode::Rgb, &bytes)
            .unwrap_or_else(|e| unreachable!("valid buffer rejected: {e}"))
    }

    fn blank(width: usize, height: usize, mode: ChannelMode) -> PixelGrid {
        PixelGrid::blank(width, height, mode)
            .unwrap_or_else(|e| unreachable!("blank grid rejected: {e}"))
    }

    // Tests blank canvas is all zero and all invalid
    #[test]
    fn test_blank_grid_initial_state() {
        let grid = blank(4, 3, ChannelMode::Rgba);

        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.channels(), 4);
        assert_eq!(grid.valid_count(), 0);
        assert!(!grid.is_complete());
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.get((x, y)).ok(), Some(&[0, 0, 0, 0][..]));
                assert_eq!(grid.is_valid((x, y)).ok(), Some(false));
            }
        }
    }

    // Tests zero dimensions are rejected
    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelGrid::blank(0, 3, ChannelMode::Rgb),
            Err(SynthesisError::InvalidParameter { .. })
        ));
        assert!(PixelGrid::from_raw(3, 0, ChannelMode::Rgb, &[]).is_err());
    }

    // Tests raw buffer lays out pixels row-major and marks all valid
    #[test]
    fn test_from_raw_row_major() {
        let bytes = [
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let grid = PixelGrid::from_raw(2, 2, ChannelMode::Rgb, &bytes)
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(grid.get((1, 0)).ok(), Some(&[4, 5, 6][..]));
        assert_eq!(grid.get((0, 1)).ok(), Some(&[7, 8, 9][..]));
        assert!(grid.is_complete());
        assert_eq!(grid.to_raw(), bytes.to_vec());
    }

    // Tests buffer length mismatch is reported
    #[test]
    fn test_from_raw_length_mismatch() {
        let result = PixelGrid::from_raw(2, 2, ChannelMode::Rgba, &[0; 12]);
        assert!(matches!(
            result,
            Err(SynthesisError::InvalidBuffer {
                expected: 16,
                actual: 12
            })
        ));
    }

    // Tests bounds checks on every accessor
    #[test]
    fn test_out_of_range_access() {
        let mut grid = blank(3, 2, ChannelMode::Rgb);

        assert!(grid.in_bounds((2, 1)));
        assert!(!grid.in_bounds((3, 1)));
        assert!(!grid.in_bounds((0, 2)));

        assert!(matches!(
            grid.get((3, 0)),
            Err(SynthesisError::OutOfRange {
                position: (3, 0),
                dimensions: (3, 2)
            })
        ));
        assert!(matches!(
            grid.set((0, 2), &[1, 2, 3]),
            Err(SynthesisError::OutOfRange { .. })
        ));
        assert!(matches!(
            grid.mark_valid((5, 5)),
            Err(SynthesisError::OutOfRange { .. })
        ));
        assert!(grid.is_valid((3, 2)).is_err());
    }

    // Tests channel count mismatch on write
    #[test]
    fn test_set_channel_mismatch() {
        let mut grid = blank(2, 2, ChannelMode::Rgb);
        assert!(matches!(
            grid.set((0, 0), &[1, 2, 3, 4]),
            Err(SynthesisError::ChannelMismatch {
                expected: 3,
                actual: 4
            })
        ));
        assert_eq!(grid.get((0, 0)).ok(), Some(&[0, 0, 0][..]));
    }

    // Tests value write and validity commit are independent
    #[test]
    fn test_set_then_mark_valid() {
        let mut grid = blank(2, 2, ChannelMode::Rgb);

        assert!(grid.set((1, 1), &[9, 8, 7]).is_ok());
        assert_eq!(grid.get((1, 1)).ok(), Some(&[9, 8, 7][..]));
        assert_eq!(grid.is_valid((1, 1)).ok(), Some(false));

        assert!(grid.mark_valid((1, 1)).is_ok());
        assert!(grid.mark_valid((1, 1)).is_ok());
        assert_eq!(grid.is_valid((1, 1)).ok(), Some(true));
        assert_eq!(grid.valid_count(), 1);

        // Neighbours untouched
        assert_eq!(grid.get((0, 1)).ok(), Some(&[0, 0, 0][..]));
        assert_eq!(grid.is_valid((0, 1)).ok(), Some(false));
    }

    // Tests index and position conversion agree
    #[test]
    fn test_index_position_round_trip() {
        let grid = blank(5, 3, ChannelMode::Rgb);

        assert_eq!(grid.index_of((0, 0)), Some(0));
        assert_eq!(grid.index_of((4, 0)), Some(4));
        assert_eq!(grid.index_of((0, 1)), Some(5));
        assert_eq!(grid.index_of((5, 0)), None);
        assert_eq!(grid.position_of(7), Some((2, 1)));
        assert_eq!(grid.position_of(15), None);

        for index in 0..grid.len() {
            let position = grid.position_of(index);
            assert_eq!(position.and_then(|p| grid.index_of(p)), Some(index));
        }
    }

    // Tests all-valid filtering keeps exactly the in-bounds offsets
    #[test]
    fn test_filter_all_valid() {
        let grid = numbered_rgb(5, 5);
        let shape = NeighbourhoodShape::square(1).unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(grid.filter_neighbourhood((2, 2), shape.offsets()).len(), 9);
        assert_eq!(grid.filter_neighbourhood((0, 0), shape.offsets()).len(), 4);
        assert_eq!(grid.filter_neighbourhood((4, 2), shape.offsets()).len(), 6);

        let corner = grid.filter_neighbourhood((0, 0), shape.offsets());
        assert!(corner.iter().all(|o| o.dx >= 0 && o.dy >= 0));
    }

    // Tests all-invalid filtering returns nothing
    #[test]
    fn test_filter_all_invalid() {
        let grid = blank(4, 4, ChannelMode::Rgb);
        let shapes = [NeighbourhoodShape::square(2), NeighbourhoodShape::causal_ell(2)];
        assert!(shapes.iter().all(Result::is_ok));
        for shape in shapes.into_iter().flatten() {
            for y in 0..4 {
                for x in 0..4 {
                    assert!(grid.filter_neighbourhood((x, y), shape.offsets()).is_empty());
                }
            }
        }
    }

    // Tests filtering respects validity and keeps shape order
    #[test]
    fn test_filter_partial_validity_order() {
        let mut grid = blank(3, 3, ChannelMode::Rgb);
        for position in [(0, 0), (2, 0), (0, 1)] {
            assert!(grid.mark_valid(position).is_ok());
        }

        let shape = NeighbourhoodShape::causal_ell(1).unwrap_or_else(|e| unreachable!("{e}"));
        let kept = grid.filter_neighbourhood((1, 1), shape.offsets());
        assert_eq!(
            kept,
            vec![Offset::new(-1, -1), Offset::new(1, -1), Offset::new(-1, 0)]
        );
    }

    // Tests reused buffer is cleared between calls
    #[test]
    fn test_filter_into_clears_buffer() {
        let grid = numbered_rgb(3, 3);
        let shape = NeighbourhoodShape::square(1).unwrap_or_else(|e| unreachable!("{e}"));
        let mut buffer = vec![Offset::new(7, 7)];

        grid.filter_neighbourhood_into((0, 0), shape.offsets(), &mut buffer);
        assert_eq!(buffer.len(), 4);
        assert!(!buffer.contains(&Offset::new(7, 7)));
    }

    // Tests locate combines offset and bounds
    #[test]
    fn test_locate() {
        let grid = blank(3, 3, ChannelMode::Rgb);
        assert_eq!(grid.locate((1, 1), Offset::new(1, 1)), Some((2, 2)));
        assert_eq!(grid.locate((2, 2), Offset::new(1, 0)), None);
        assert_eq!(grid.locate((0, 0), Offset::new(0, -1)), None);
    }

    // Tests mode conversion pads and drops alpha while keeping validity
    #[test]
    fn test_mode_conversion() {
        let mut grid = blank(2, 1, ChannelMode::Rgb);
        assert!(grid.set((0, 0), &[10, 20, 30]).is_ok());
        assert!(grid.mark_valid((0, 0)).is_ok());

        let rgba = grid.to_mode(ChannelMode::Rgba);
        assert_eq!(rgba.mode(), ChannelMode::Rgba);
        assert_eq!(rgba.get((0, 0)).ok(), Some(&[10, 20, 30, 255][..]));
        assert_eq!(rgba.is_valid((0, 0)).ok(), Some(true));
        assert_eq!(rgba.is_valid((1, 0)).ok(), Some(false));

        let back = rgba.to_mode(ChannelMode::Rgb);
        assert_eq!(back, grid);
        assert_eq!(grid.to_mode(ChannelMode::Rgb), grid);
    }

    // Tests channel mode helpers
    #[test]
    fn test_channel_mode() {
        assert_eq!(ChannelMode::Rgb.channels(), 3);
        assert_eq!(ChannelMode::Rgba.channels(), 4);
        assert_eq!(ChannelMode::from_alpha(true), ChannelMode::Rgba);
        assert_eq!(ChannelMode::from_alpha(false), ChannelMode::Rgb);
        assert!(!ChannelMode::Rgb.has_alpha());
    }
}
