use tracing::trace;

use crate::binarizer::{BinaryBitmap, Binarizer};
use crate::error::Result;
use crate::luminance::LuminanceSource;

/// 0°, 90°, 180° and 270° counterclockwise
pub const ROTATION_ATTEMPTS: u32 = 4;

/// Run `attempt` against the source, then against successive 90° CCW rotations
///
/// One attempt is made unless `auto_rotate` is set and the source can
/// rotate, in which case up to [`ROTATION_ATTEMPTS`] are made. The bitmap is
/// rebuilt from each rotated source. Stops at the first `Some` and returns
/// it with the number of rotations applied; errors from the source, the
/// binarizer or `attempt` end the loop and are returned as-is.
pub(crate) fn decode_with_rotation<T>(
    mut source: Box<dyn LuminanceSource>,
    binarizer: &dyn Binarizer,
    auto_rotate: bool,
    mut attempt: impl FnMut(&BinaryBitmap) -> Result<Option<T>>,
) -> Result<Option<(T, u32)>> {
    let rotatable = auto_rotate && source.is_rotate_supported();
    let budget = if rotatable { ROTATION_ATTEMPTS } else { 1 };
    let mut bitmap = BinaryBitmap::new(source.as_ref(), binarizer)?;

    for rotation in 0..budget {
        trace!(
            rotation,
            width = bitmap.width(),
            height = bitmap.height(),
            "decode attempt"
        );
        if let Some(found) = attempt(&bitmap)? {
            return Ok(Some((found, rotation)));
        }
        if !rotatable || rotation + 1 == budget {
            break;
        }
        source = source.rotate_counter_clockwise()?;
        bitmap = BinaryBitmap::new(source.as_ref(), binarizer)?;
    }

    Ok(None)
}
