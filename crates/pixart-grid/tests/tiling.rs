//! Tiling and hit-test properties across many surface sizes

use pixart_grid::*;

// ============================================================================
// TILING
// ============================================================================

/// Every surface point lands in exactly one cell when cells are treated as
/// half-open boxes.
fn assert_exact_tiling(model: &GridModel) {
    let surface = model.surface_size();
    let mut coverage = vec![0u8; (surface.width * surface.height) as usize];

    for cell in model.cells() {
        assert!(cell.x() + cell.width() <= surface.width);
        assert!(cell.y() + cell.height() <= surface.height);
        for y in cell.y()..cell.y() + cell.height() {
            for x in cell.x()..cell.x() + cell.width() {
                coverage[(y * surface.width + x) as usize] += 1;
            }
        }
    }

    assert!(coverage.iter().all(|&c| c == 1), "gap or overlap in tiling");
}

#[test]
fn test_cell_count_for_all_valid_sizes() {
    for (w, h) in [(100, 100), (137, 211), (600, 300), (250, 90 + 10)] {
        let mut model = GridModel::new(Size::new(w, h)).unwrap();
        let range = model.allowed_cell_sizes();
        assert_eq!(range.min, 1);
        assert_eq!(range.max, w.min(h) / 10);

        for cell_size in range.min..=range.max {
            model.set_cell_size(cell_size).unwrap();
            let surface = model.surface_size();
            assert_eq!(surface.width % cell_size, 0);
            assert_eq!(surface.height % cell_size, 0);
            assert_eq!(
                model.cells().len() as u32,
                (surface.width / cell_size) * (surface.height / cell_size)
            );
        }
    }
}

#[test]
fn test_no_gap_no_overlap() {
    let mut model = GridModel::new(Size::new(137, 211)).unwrap();
    for cell_size in [1, 3, 7, 13] {
        model.set_cell_size(cell_size).unwrap();
        assert_exact_tiling(&model);
    }
}

#[test]
fn test_snapped_surface_still_admits_cell_size() {
    // The snapped surface never shrinks below ten cells on its short edge.
    for edge in 100..260 {
        let mut model = GridModel::new(Size::new(edge, 600)).unwrap();
        let max = model.allowed_cell_sizes().max;
        model.set_cell_size(max).unwrap();
        let surface = model.surface_size();
        assert!(compute_allowed_cell_size_range(surface.width, surface.height).contains(max));
    }
}

// ============================================================================
// HIT TESTING
// ============================================================================

#[test]
fn test_hit_test_total_over_interior_points() {
    let model = GridModel::new(Size::new(100, 60)).unwrap();

    for cell in model.cells() {
        let (cx, cy) = cell.center();
        let id = model.hit_test(cx, cy).expect("center must hit");
        assert_eq!(model.cell(id), Some(cell));
    }
}

#[test]
fn test_hit_test_shared_edges_return_none() {
    let model = GridModel::new(Size::new(100, 60)).unwrap();

    for x in (0..=100).step_by(10) {
        assert_eq!(model.hit_test(f64::from(x), 5.0), None);
    }
    for y in (0..=60).step_by(10) {
        assert_eq!(model.hit_test(5.0, f64::from(y)), None);
    }
}

#[test]
fn test_hit_test_index_matches_canonical_order() {
    let model = GridModel::new(Size::new(100, 100)).unwrap();
    let ids: Vec<CellId> = model.cell_ids().collect();

    let id = model.hit_test(25.0, 35.0).unwrap();
    // Column 2, row 3 with 10 rows per column
    assert_eq!(id.index(), 2 * 10 + 3);
    assert_eq!(ids[id.index()], id);
}
