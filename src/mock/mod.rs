pub mod mock_hand;
pub mod mock_transport;
