//! Lottery inventory arithmetic shared by the server and its clients

pub mod serial;
pub mod unscanned;

pub use serial::{Serial, SerialError, closing_tickets, format_serial, sales_amount, tickets_sold, to_int};
pub use unscanned::{
    BinDecision, SelectAll, SoldOutDecision, UnscannedBinInfo, UnscannedBinResolver, find_unscanned,
};
