use crate::error::{BitmapError, Result};
use crate::image::Bitmap;

impl Bitmap {
    /// Keep the `dx × dy` rectangle whose first pixel is column `x`,
    /// row `y`. The rectangle must be non-empty and lie inside the image.
    pub fn crop(&mut self, x: u32, y: u32, dx: u32, dy: u32) -> Result<()> {
        let fits_x = x.checked_add(dx).is_some_and(|end| end <= self.width());
        let fits_y = y.checked_add(dy).is_some_and(|end| end <= self.height());
        if dx == 0 || dy == 0 || !fits_x || !fits_y {
            return Err(BitmapError::dimension(format!(
                "crop ({x}, {y}) {dx}x{dy} does not fit in {}x{}",
                self.width(),
                self.height()
            )));
        }
        let grid = self
            .grid()
            .sub_grid(x as usize, y as usize, dx as usize, dy as usize);
        self.replace_grid(grid);
        Ok(())
    }
}
