//! Responses for SMS Commands
use atat::atat_derive::AtatResp;

/// `+CMGS: <mr>`, the reference the network assigned to a sent message
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatResp)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageReference {
    #[at_arg(position = 0)]
    pub mr: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use atat::serde_at::de::from_str;

    #[test]
    fn message_reference() {
        assert_eq!(
            from_str::<MessageReference>("+CMGS: 17"),
            Ok(MessageReference { mr: 17 })
        );
    }
}
