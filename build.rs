fn main() -> shadow_rs::SdResult<()> {
    // version metadata for `chart-it --version`
    shadow_rs::ShadowBuilder::builder().build()?;
    Ok(())
}
