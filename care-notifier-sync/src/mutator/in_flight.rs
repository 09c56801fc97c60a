use crate::{dto::NotificationId, error::Error};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub enum Claim {
    Item(NotificationId),
    Bulk,
}

///
/// Mutations awaiting remote confirmation.
///
/// Mutations of the same notification never overlap
/// and bulk mutations never overlap with anything else.
///
#[derive(Debug, Default)]
pub struct InFlight {
    items: HashSet<NotificationId>,
    bulk: bool,
}

impl InFlight {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.bulk
    }

    pub fn claim(&mut self, claim: &Claim) -> Result<(), Error> {
        if self.bulk {
            return Err(Error::BulkMutationInFlight);
        }

        match claim {
            Claim::Item(id) => {
                if !self.items.insert(id.clone()) {
                    return Err(Error::ItemMutationInFlight(id.clone()));
                }
            }
            Claim::Bulk => {
                if !self.items.is_empty() {
                    return Err(Error::MutationsInFlight(self.items.len()));
                }
                self.bulk = true;
            }
        }

        Ok(())
    }

    pub fn release(&mut self, claim: &Claim) {
        match claim {
            Claim::Item(id) => {
                self.items.remove(id);
            }
            Claim::Bulk => self.bulk = false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disjoint_items_allowed() {
        let mut in_flight = InFlight::default();

        in_flight.claim(&item("a")).unwrap();
        in_flight.claim(&item("b")).unwrap();

        assert!(!in_flight.is_empty());
    }

    #[test]
    fn same_item_rejected_until_released() {
        let mut in_flight = InFlight::default();
        in_flight.claim(&item("a")).unwrap();

        let result = in_flight.claim(&item("a"));
        assert!(matches!(result, Err(Error::ItemMutationInFlight(_))));

        in_flight.release(&item("a"));
        assert!(in_flight.is_empty());
        assert!(in_flight.claim(&item("a")).is_ok());
    }

    #[test]
    fn bulk_rejected_while_item_in_flight() {
        let mut in_flight = InFlight::default();
        in_flight.claim(&item("a")).unwrap();

        let result = in_flight.claim(&Claim::Bulk);

        assert!(matches!(result, Err(Error::MutationsInFlight(1))));
    }

    #[test]
    fn everything_rejected_while_bulk_in_flight() {
        let mut in_flight = InFlight::default();
        in_flight.claim(&Claim::Bulk).unwrap();

        assert!(matches!(
            in_flight.claim(&item("a")),
            Err(Error::BulkMutationInFlight)
        ));
        assert!(matches!(
            in_flight.claim(&Claim::Bulk),
            Err(Error::BulkMutationInFlight)
        ));

        in_flight.release(&Claim::Bulk);
        assert!(in_flight.is_empty());
    }

    fn item(id: &str) -> Claim {
        Claim::Item(NotificationId::new(id))
    }
}
