pub mod test_inbound_offer_answered;
pub mod test_misaddressed_signals_ignored;
