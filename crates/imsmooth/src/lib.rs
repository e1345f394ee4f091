#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use imsmooth_image as image;

#[doc(inline)]
pub use imsmooth_imgproc as imgproc;

#[doc(inline)]
pub use imsmooth_io as io;
