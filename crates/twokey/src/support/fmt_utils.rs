use core::fmt;

/// A static label that `Debug`-formats without quotes, for naming fields
/// inside `debug_map` output.
pub(crate) struct Label(pub(crate) &'static str);

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
