use std::rc::Rc;

use crate::graph::network::NetworkError;
use crate::scenarios::ScenarioMaker;

use super::{alarm::Alarm, chain::WetChain, student::Student};

pub struct ScenarioMakerFactory;

impl ScenarioMakerFactory {
    pub fn new_shared(name: &str) -> Result<Rc<dyn ScenarioMaker>, NetworkError> {
        match name {
            "wet_chain" => Ok(Rc::new(WetChain {})),
            "alarm" => Ok(Rc::new(Alarm {})),
            "student" => Ok(Rc::new(Student {})),
            _ => Err(NetworkError::UnknownScenario(name.to_string())),
        }
    }
}
