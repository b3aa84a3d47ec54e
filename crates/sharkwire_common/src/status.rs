/// Sink for the single piece of status the modem layer reports.
pub trait StatusDisplay {
    fn show_modem_status(&mut self, initialised: bool);
}
