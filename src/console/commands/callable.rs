/// One console subcommand. `main` maps an `Err` to exit status 1.
pub trait CallableTrait {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>>;
}
