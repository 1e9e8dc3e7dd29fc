use serde::{Deserialize, Serialize};

use crate::buffer::SampleBuffer;

/// One neuron's activation snapshot as handed over by the owning UI or
/// network layer, e.g. as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronUpdate {
    pub id: String,
    pub outputs: Vec<f64>,
    /// Width (= height) of the square sample grid. Optional: when absent
    /// the renderer infers it from the resolved surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_side_length: Option<usize>,
}

/// The full inbound message: every neuron to (re)draw, in draw order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkUpdate {
    pub network: Vec<NeuronUpdate>,
}

/// A neuron queued for drawing: the id addressing its surface plus the
/// flattened activation grid.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub id: String,
    pub outputs: SampleBuffer,
    pub side_length: Option<usize>,
}

impl Neuron {
    /// An empty neuron whose buffer is sized for a `side_length²` grid.
    pub fn new(id: impl Into<String>, side_length: usize) -> Neuron {
        Neuron {
            id: id.into(),
            outputs: SampleBuffer::new(side_length * side_length),
            side_length: Some(side_length),
        }
    }

    /// A fully populated neuron; the grid side is inferred at draw time.
    pub fn from_samples(id: impl Into<String>, samples: &[f64]) -> Neuron {
        Neuron {
            id: id.into(),
            outputs: SampleBuffer::from_samples(samples),
            side_length: None,
        }
    }
}

impl From<NeuronUpdate> for Neuron {
    fn from(update: NeuronUpdate) -> Neuron {
        Neuron {
            id: update.id,
            outputs: SampleBuffer::from_samples(&update.outputs),
            side_length: update.surface_side_length,
        }
    }
}

/// Draw-ordered set of neurons. The renderer walks it front to back; the
/// order is stable but carries no meaning beyond reproducibility.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub neurons: Vec<Neuron>,
}

impl Network {
    pub fn new(neurons: Vec<Neuron>) -> Network {
        Network { neurons }
    }

    pub fn push(&mut self, neuron: Neuron) {
        self.neurons.push(neuron);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neuron> {
        self.neurons.iter()
    }
}

impl From<NetworkUpdate> for Network {
    fn from(update: NetworkUpdate) -> Network {
        Network {
            neurons: update.network.into_iter().map(Neuron::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_message_deserializes_and_converts() {
        let json = r#"{"network":[
            {"id":"n1","outputs":[0.0,0.5,-0.5,1.0],"surface_side_length":2},
            {"id":"n2","outputs":[1.0]}
        ]}"#;
        let update: NetworkUpdate = serde_json::from_str(json).unwrap();
        let network = Network::from(update);
        assert_eq!(network.neurons.len(), 2);
        assert_eq!(network.neurons[0].id, "n1");
        assert_eq!(network.neurons[0].side_length, Some(2));
        assert_eq!(network.neurons[0].outputs.samples().unwrap(), vec![0.0, 0.5, -0.5, 1.0]);
        assert_eq!(network.neurons[1].side_length, None);
    }

    #[test]
    fn new_neuron_buffer_is_sized_for_the_grid() {
        let neuron = Neuron::new("n1", 5);
        assert_eq!(neuron.outputs.len(), 25);
        assert!(!neuron.outputs.is_filled());
    }
}
