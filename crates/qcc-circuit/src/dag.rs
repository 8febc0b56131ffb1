// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! [`DAGCircuit`]: a [`Circuit`] plus a qubit-dependency DAG used by the
//! synthesis passes to find runs of same-qubit operations.

use crate::circuit::Circuit;
use crate::error::CircuitError;
use crate::operation::Operation;
use std::ops::Deref;

/// One edge of the dependency DAG: operation `node` is adjacent via `qubit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDependency {
    pub qubit: usize,
    pub node: usize,
}

/// A [`Circuit`] with two adjacency lists threaded from consecutive
/// same-qubit operations, plus a `last_op_on_qubit` cursor used to thread
/// new edges as operations are appended.
#[derive(Debug, Clone)]
pub struct DAGCircuit {
    circuit: Circuit,
    successors: Vec<Vec<OperationDependency>>,
    predecessors: Vec<Vec<OperationDependency>>,
    last_op_on_qubit: Vec<Option<usize>>,
}

impl Deref for DAGCircuit {
    type Target = Circuit;
    fn deref(&self) -> &Circuit {
        &self.circuit
    }
}

impl DAGCircuit {
    /// Builds a DAG by replaying `circuit`'s existing operation list.
    #[must_use]
    pub fn new(circuit: Circuit) -> Self {
        let n = circuit.num_qubits();
        let mut dag = DAGCircuit {
            circuit,
            successors: Vec::new(),
            predecessors: Vec::new(),
            last_op_on_qubit: vec![None; n],
        };
        dag.rebuild_dag();
        dag
    }

    /// Recomputes every edge from scratch, from the circuit's current
    /// operation list. Used after external mutation of the wrapped circuit.
    pub fn rebuild_dag(&mut self) {
        let n_ops = self.circuit.get_operations().len();
        self.successors = vec![Vec::new(); n_ops];
        self.predecessors = vec![Vec::new(); n_ops];
        self.last_op_on_qubit = vec![None; self.circuit.num_qubits()];

        for idx in 0..n_ops {
            let qubits = self.circuit.get_operations()[idx].active_qubits();
            for q in qubits {
                if q >= self.last_op_on_qubit.len() {
                    self.last_op_on_qubit.resize(q + 1, None);
                }
                if let Some(prev) = self.last_op_on_qubit[q] {
                    self.successors[prev].push(OperationDependency { qubit: q, node: idx });
                    self.predecessors[idx].push(OperationDependency { qubit: q, node: prev });
                }
                self.last_op_on_qubit[q] = Some(idx);
            }
        }
    }

    /// Appends `op` to the underlying circuit and threads its dependency
    /// edges. Unlike `Circuit::add_operation`, this validates indices
    /// strictly against the circuit's declared qubit count: an
    /// out-of-range index here is always a caller bug, never user input
    /// (malformed QASM is rejected earlier, during parsing/lowering).
    pub fn add_operation(&mut self, op: Operation) -> Result<(), CircuitError> {
        let bound = self.circuit.num_qubits();
        for &q in op.get_qubits() {
            if q >= bound {
                return Err(CircuitError::IndexOutOfRange { index: q, bound });
            }
        }
        let qubits = op.active_qubits();
        let new_idx = self.circuit.get_operations().len();
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.circuit.add_operation(op);

        for q in qubits {
            if q >= self.last_op_on_qubit.len() {
                self.last_op_on_qubit.resize(q + 1, None);
            }
            if let Some(prev) = self.last_op_on_qubit[q] {
                self.successors[prev].push(OperationDependency { qubit: q, node: new_idx });
                self.predecessors[new_idx].push(OperationDependency { qubit: q, node: prev });
            }
            self.last_op_on_qubit[q] = Some(new_idx);
        }
        Ok(())
    }

    pub fn get_successors(&self, node: usize) -> Result<&[OperationDependency], CircuitError> {
        self.successors.get(node).map(Vec::as_slice).ok_or(CircuitError::IndexOutOfRange { index: node, bound: self.successors.len() })
    }

    pub fn get_predecessors(&self, node: usize) -> Result<&[OperationDependency], CircuitError> {
        self.predecessors.get(node).map(Vec::as_slice).ok_or(CircuitError::IndexOutOfRange { index: node, bound: self.predecessors.len() })
    }

    /// Operations with no predecessors (the DAG's sources).
    #[must_use]
    pub fn get_root_nodes(&self) -> Vec<usize> {
        (0..self.predecessors.len()).filter(|&i| self.predecessors[i].is_empty()).collect()
    }

    /// Operations with no successors (the DAG's sinks).
    #[must_use]
    pub fn get_leaf_nodes(&self) -> Vec<usize> {
        (0..self.successors.len()).filter(|&i| self.successors[i].is_empty()).collect()
    }

    /// The immediate successor of `node` on qubit `qubit`, if any.
    #[must_use]
    pub fn successor_on_qubit(&self, node: usize, qubit: usize) -> Option<usize> {
        self.successors.get(node)?.iter().find(|d| d.qubit == qubit).map(|d| d.node)
    }

    #[must_use]
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    #[must_use]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OpType;

    #[test]
    fn linear_chain_threads_edges() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::Cx, vec![0, 1]));
        c.add_operation(Operation::new(OpType::H, vec![1]));
        let dag = DAGCircuit::new(c);

        assert_eq!(dag.get_root_nodes(), vec![0]);
        assert_eq!(dag.get_leaf_nodes(), vec![2]);
        assert_eq!(dag.get_successors(0).unwrap(), &[OperationDependency { qubit: 0, node: 1 }]);
        assert_eq!(dag.get_predecessors(2).unwrap(), &[OperationDependency { qubit: 1, node: 1 }]);
    }

    #[test]
    fn independent_qubits_yield_two_roots() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::H, vec![1]));
        let dag = DAGCircuit::new(c);
        assert_eq!(dag.get_root_nodes(), vec![0, 1]);
        assert_eq!(dag.get_leaf_nodes(), vec![0, 1]);
    }

    #[test]
    fn add_operation_rejects_out_of_range_qubit() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        let mut dag = DAGCircuit::new(c);
        let err = dag.add_operation(Operation::new(OpType::H, vec![5])).unwrap_err();
        assert_eq!(err, CircuitError::IndexOutOfRange { index: 5, bound: 1 });
    }

    #[test]
    fn rebuild_dag_after_external_mutation() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        let mut dag = DAGCircuit::new(c);
        dag.circuit.add_operation(Operation::new(OpType::T, vec![0]));
        dag.rebuild_dag();
        assert_eq!(dag.get_successors(0).unwrap(), &[OperationDependency { qubit: 0, node: 1 }]);
    }
}
