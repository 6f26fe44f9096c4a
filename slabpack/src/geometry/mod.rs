mod dims;
mod rect;

#[doc(inline)]
pub use dims::Dims;
#[doc(inline)]
pub use dims::Orientation;
#[doc(inline)]
pub use rect::Rect;
