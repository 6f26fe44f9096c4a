mod instance;
mod piece;
mod placement;
mod result;
mod slab;

#[doc(inline)]
pub use instance::PackInstance;

#[doc(inline)]
pub use piece::Piece;

#[doc(inline)]
pub use piece::PieceId;

#[doc(inline)]
pub use piece::Priority;

#[doc(inline)]
pub use placement::Placement;

#[doc(inline)]
pub use slab::Slab;

#[doc(inline)]
pub use result::PackingResult;
