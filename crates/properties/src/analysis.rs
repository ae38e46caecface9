use std::fmt;

use itertools::Itertools;
use log::debug;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use transalg_cayley::CayleyTableActions;

use crate::check_associativity;
use crate::check_commutativity;
use crate::check_element_orders;
use crate::check_identity;
use crate::check_inverse;
use crate::AssociativityInfo;
use crate::CommutativityInfo;
use crate::ElementOrders;
use crate::IdentityInfo;
use crate::InverseInfo;
use crate::PropertyError;

/// The results of the property analyses of one algebra. Every analysis is
/// absent until it has been run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    associativity: Option<AssociativityInfo>,
    identity: Option<IdentityInfo>,
    inverse: Option<InverseInfo>,
    orders: Option<ElementOrders>,
    commutativity: Option<CommutativityInfo>,
}

impl PropertyAnalysis {
    pub fn new() -> PropertyAnalysis {
        PropertyAnalysis::default()
    }

    /// Runs all the analyses on the table.
    pub fn analyse(table: &CayleyTableActions) -> Result<PropertyAnalysis, PropertyError> {
        let mut analysis = PropertyAnalysis::new();
        analysis.check_associativity(table);
        analysis.check_identity(table)?;
        analysis.check_inverse(table)?;
        analysis.check_element_orders(table)?;
        analysis.check_commutativity(table);

        info!("Properties of the algebra with {} elements: {}", table.len(), analysis);
        Ok(analysis)
    }

    pub fn check_associativity(&mut self, table: &CayleyTableActions) -> &AssociativityInfo {
        let info = check_associativity(table);
        debug!("Associative: {} ({} violations)", info.is_associative, info.violations);
        self.associativity.insert(info)
    }

    pub fn check_identity(&mut self, table: &CayleyTableActions) -> Result<&IdentityInfo, PropertyError> {
        let info = check_identity(table)?;
        debug!(
            "Identity {:?}, left identities [{}], right identities [{}]",
            info.identity,
            info.left_identities.iter().format(", "),
            info.right_identities.iter().format(", ")
        );
        Ok(self.identity.insert(info))
    }

    /// Requires the identity analysis.
    pub fn check_inverse(&mut self, table: &CayleyTableActions) -> Result<&InverseInfo, PropertyError> {
        let info = check_inverse(table, self.identity()?)?;
        debug!("Inverse algebra: {}", info.is_inverse_algebra);
        Ok(self.inverse.insert(info))
    }

    /// Requires the identity analysis.
    pub fn check_element_orders(&mut self, table: &CayleyTableActions) -> Result<&ElementOrders, PropertyError> {
        let info = check_element_orders(table, self.identity()?);
        debug!("Maximal element order: {:?}", info.max_order());
        Ok(self.orders.insert(info))
    }

    pub fn check_commutativity(&mut self, table: &CayleyTableActions) -> &CommutativityInfo {
        let info = check_commutativity(table);
        debug!("Commutative: {}", info.is_commutative);
        self.commutativity.insert(info)
    }

    pub fn associativity(&self) -> Result<&AssociativityInfo, PropertyError> {
        self.associativity
            .as_ref()
            .ok_or(PropertyError::Precondition { stage: "associativity" })
    }

    pub fn identity(&self) -> Result<&IdentityInfo, PropertyError> {
        self.identity.as_ref().ok_or(PropertyError::Precondition { stage: "identity" })
    }

    pub fn inverse(&self) -> Result<&InverseInfo, PropertyError> {
        self.inverse.as_ref().ok_or(PropertyError::Precondition { stage: "inverse" })
    }

    pub fn element_orders(&self) -> Result<&ElementOrders, PropertyError> {
        self.orders
            .as_ref()
            .ok_or(PropertyError::Precondition { stage: "element order" })
    }

    pub fn commutativity(&self) -> Result<&CommutativityInfo, PropertyError> {
        self.commutativity
            .as_ref()
            .ok_or(PropertyError::Precondition { stage: "commutativity" })
    }

    /// Returns true iff all the analyses have been run.
    pub fn is_complete(&self) -> bool {
        self.associativity.is_some()
            && self.identity.is_some()
            && self.inverse.is_some()
            && self.orders.is_some()
            && self.commutativity.is_some()
    }
}

impl fmt::Display for PropertyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties = Vec::new();

        if let Some(info) = &self.associativity {
            properties.push(format!("associative: {}", info.is_associative));
        }

        if let Some(info) = &self.identity {
            match &info.identity {
                Some(identity) => properties.push(format!("identity: {}", identity)),
                None => properties.push("identity: none".to_string()),
            }
        }

        if let Some(info) = &self.inverse {
            properties.push(format!("inverses: {}", info.is_inverse_algebra));
        }

        if let Some(info) = &self.orders {
            match info.max_order() {
                Some(order) => properties.push(format!("max order: {}", order)),
                None => properties.push("max order: none".to_string()),
            }
        }

        if let Some(info) = &self.commutativity {
            properties.push(format!("commutative: {}", info.is_commutative));
        }

        write!(f, "{}", properties.iter().format(", "))
    }
}
