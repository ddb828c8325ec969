use super::*;

#[test]
fn defaults_are_usable_without_any_file_or_env() {
    let config = StoreConfig::default();
    assert!(config.capacity_hint > 0);
    assert!(config.arena_block_size > 0);
}

#[test]
#[allow(clippy::result_large_err)]
fn env_override_wins_over_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("EAVGRAPHDB_CAPACITY_HINT", "256");
        let config: StoreConfig = Figment::from(Serialized::defaults(StoreConfig::default()))
            .merge(Env::prefixed("EAVGRAPHDB_"))
            .extract()?;
        assert_eq!(config.capacity_hint, 256);
        Ok(())
    });
}
