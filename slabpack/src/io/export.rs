use crate::entities::{PackingResult, Placement, Slab};
use crate::io::ext_repr::{ExtPackingResult, ExtPlacement, ExtSlab};

/// Exports a packing result out of the library
pub fn export_result(result: &PackingResult) -> ExtPackingResult {
    ExtPackingResult {
        slab_width: result.slab_dims.width,
        slab_height: result.slab_dims.height,
        kerf: result.kerf,
        total_slabs: result.total_slabs(),
        average_efficiency: result.average_efficiency(),
        slabs: result.slabs.iter().map(export_slab).collect(),
    }
}

pub fn export_slab(slab: &Slab) -> ExtSlab {
    ExtSlab {
        index: slab.idx,
        efficiency: slab.efficiency(),
        placements: slab.placements.iter().map(export_placement).collect(),
    }
}

pub fn export_placement(placement: &Placement) -> ExtPlacement {
    let footprint = placement.footprint_dims();
    ExtPlacement {
        product_idx: placement.piece.id.product_idx,
        copy_idx: placement.piece.id.copy_idx,
        label: placement.piece.label.clone(),
        priority: placement.piece.priority.as_str().to_owned(),
        x: placement.x,
        y: placement.y,
        width: footprint.width,
        height: footprint.height,
        rotated: placement.rotated,
    }
}
