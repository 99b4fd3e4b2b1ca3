use anyhow::Result;
use rail_core::logger;

pub trait RailCommand {
    fn exec(self) -> Result<()>;

    fn verbose(&self) -> bool;

    fn invoke(self) -> Result<()>
    where
        Self: Sized,
    {
        logger::init(self.verbose());
        self.exec()
    }
}
