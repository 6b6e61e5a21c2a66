pub mod bitmap;
pub mod grid;
pub mod io;
pub mod pixel;
pub mod traits;

pub use self::bitmap::{Bitmap, BITS_PER_PIXEL};
pub use self::grid::PixelGrid;
pub use self::pixel::Pixel;
pub use self::traits::{ImageView, ImageViewMut, Rows};
