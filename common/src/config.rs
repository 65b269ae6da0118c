#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Quiet level. 0 prints headers and trees, 1 drops the decoration,
    /// 2 prints results only.
    pub quiet: u8,
    pub no_banner: bool,
    /// Overwrite existing output files without asking.
    pub force: bool,
    /// Treat a colour without a tag-map entry as an error instead of
    /// labelling the turn with the colour itself.
    pub strict: bool,
}
