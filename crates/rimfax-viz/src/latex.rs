//! Circuit diagrams as qcircuit LaTeX source.
//!
//! The generated document is standalone: one `\Qcircuit` matrix with a
//! row per qubit wire, classical wires below, and gates packed into the
//! leftmost column their operands allow. Multi-qubit gates reserve the
//! whole row span between their operands so vertical lines never cross
//! another gate in the same column.

use rimfax_compile::{BasisGates, BasisTranslation, PassManager, PropertySet};
use rimfax_ir::{
    Circuit, ClbitId, Gate, Instruction, InstructionKind, ParameterExpression, QubitId,
    StandardGate,
};

use crate::error::{VizError, VizResult};
use crate::render::RenderOptions;

/// Generate a standalone qcircuit document for a circuit.
///
/// When `options.basis` is set the circuit is first rewritten into that
/// basis, so the diagram shows what the backend would actually run.
pub fn latex_source(circuit: &Circuit, options: &RenderOptions) -> VizResult<String> {
    if circuit.num_qubits() == 0 {
        return Err(VizError::EmptyCircuit);
    }

    let rewritten;
    let drawn = match &options.basis {
        Some(csv) => {
            let mut working = circuit.clone();
            let mut properties = PropertySet::new().with_basis(BasisGates::from_csv(csv));
            let mut pipeline = PassManager::new();
            pipeline.add_pass(BasisTranslation);
            pipeline.run(&mut working, &mut properties)?;
            rewritten = working;
            &rewritten
        }
        None => circuit,
    };

    Ok(document(drawn, options))
}

/// Cell grid under construction. Rows are wires, columns are moments.
struct Grid {
    /// Set cells, indexed `[row][column]`. Unset cells fall back to the
    /// row's plain wire.
    cells: Vec<Vec<Option<String>>>,
    /// Next free column per row.
    level: Vec<usize>,
}

impl Grid {
    fn new(rows: usize) -> Self {
        Self {
            cells: vec![vec![]; rows],
            level: vec![0; rows],
        }
    }

    /// Reserve one column across the inclusive row span, returning it.
    fn allocate(&mut self, lo: usize, hi: usize) -> usize {
        let col = self.level[lo..=hi].iter().copied().max().unwrap_or(0);
        for row in lo..=hi {
            self.level[row] = col + 1;
        }
        col
    }

    fn set(&mut self, row: usize, col: usize, cell: String) {
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize(col + 1, None);
        }
        cells[col] = Some(cell);
    }

    fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells[row].get(col).and_then(|c| c.as_deref())
    }

    fn num_columns(&self) -> usize {
        self.level.iter().copied().max().unwrap_or(0)
    }
}

fn document(circuit: &Circuit, options: &RenderOptions) -> String {
    let num_qubits = circuit.num_qubits();
    let num_wires = num_qubits + circuit.num_clbits();

    let mut grid = Grid::new(num_wires);
    for instruction in circuit.instructions() {
        place(&mut grid, num_qubits, instruction);
    }

    let columns = grid.num_columns();
    let mut out = String::new();
    out.push_str("\\documentclass[border=2px]{standalone}\n");
    out.push_str("\\usepackage[braket, qm]{qcircuit}\n");
    out.push('\n');
    out.push_str("\\begin{document}\n");
    out.push_str(&format!(
        "\\Qcircuit @C={}em @R={}em {{\n",
        options.column_spacing, options.row_spacing
    ));

    for row in 0..num_wires {
        let wire = if row < num_qubits { "\\qw" } else { "\\cw" };
        out.push_str("    ");
        out.push_str(&wire_label(circuit, num_qubits, row));
        for col in 0..columns {
            out.push_str(" & ");
            out.push_str(grid.cell(row, col).unwrap_or(wire));
        }
        // Dangling wire past the last operation.
        out.push_str(" & ");
        out.push_str(wire);
        out.push_str(" \\\\\n");
    }

    out.push_str("}\n");
    out.push_str("\\end{document}\n");
    out
}

fn wire_label(circuit: &Circuit, num_qubits: usize, row: usize) -> String {
    let handle = if row < num_qubits {
        circuit
            .qubit(QubitId(row as u32))
            .map(|q| (q.register.as_str(), q.index))
    } else {
        circuit
            .clbit(ClbitId((row - num_qubits) as u32))
            .map(|c| (c.register.as_str(), c.index))
    };
    match handle {
        Some((register, index)) => {
            format!("\\lstick{{{}_{{{}}}}}", register.replace('_', "\\_"), index)
        }
        None => "\\lstick{}".to_string(),
    }
}

fn place(grid: &mut Grid, num_qubits: usize, instruction: &Instruction) {
    match &instruction.kind {
        InstructionKind::Gate(gate) => place_gate(grid, gate, &instruction.qubits),
        InstructionKind::Measure => {
            let (Some(&qubit), Some(&clbit)) =
                (instruction.qubits.first(), instruction.clbits.first())
            else {
                return;
            };
            let qrow = qubit.0 as usize;
            let crow = num_qubits + clbit.0 as usize;
            let col = grid.allocate(qrow, crow);
            grid.set(qrow, col, "\\meter".to_string());
            grid.set(crow, col, format!("\\cw \\cwx[-{}]", crow - qrow));
        }
        InstructionKind::Reset => {
            if let Some(&qubit) = instruction.qubits.first() {
                let row = qubit.0 as usize;
                let col = grid.allocate(row, row);
                grid.set(row, col, "\\push{\\ket{0}} \\qw".to_string());
            }
        }
        InstructionKind::Barrier => {
            let rows: Vec<usize> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
            let (Some(&lo), Some(&hi)) = (rows.iter().min(), rows.iter().max()) else {
                return;
            };
            let col = grid.allocate(lo, hi);
            grid.set(lo, col, format!("\\qw \\barrier[0em]{{{}}}", hi - lo));
        }
    }
}

fn place_gate(grid: &mut Grid, gate: &Gate, qubits: &[QubitId]) {
    let rows: Vec<usize> = qubits.iter().map(|q| q.0 as usize).collect();
    let (Some(&lo), Some(&hi)) = (rows.iter().min(), rows.iter().max()) else {
        return;
    };
    let col = grid.allocate(lo, hi);

    match (&gate.gate, rows.as_slice()) {
        (StandardGate::CX, &[control, target]) => {
            grid.set(control, col, ctrl(control, target));
            grid.set(target, col, "\\targ".to_string());
        }
        (StandardGate::CY, &[control, target]) => {
            grid.set(control, col, ctrl(control, target));
            grid.set(target, col, "\\gate{Y}".to_string());
        }
        (StandardGate::CZ, &[control, target]) => {
            grid.set(control, col, ctrl(control, target));
            grid.set(target, col, "\\control \\qw".to_string());
        }
        (StandardGate::CH, &[control, target]) => {
            grid.set(control, col, ctrl(control, target));
            grid.set(target, col, "\\gate{H}".to_string());
        }
        (StandardGate::Swap, &[a, b]) => {
            let (top, bottom) = if a < b { (a, b) } else { (b, a) };
            grid.set(top, col, "\\qswap".to_string());
            grid.set(bottom, col, format!("\\qswap \\qwx[-{}]", bottom - top));
        }
        (StandardGate::CCX, &[_, _, target]) => {
            // Controls draw their vertical segment toward the target
            // along the sorted row chain.
            let mut ordered = rows.clone();
            ordered.sort_unstable();
            for (i, &row) in ordered.iter().enumerate() {
                if row == target {
                    grid.set(row, col, "\\targ".to_string());
                } else if row < target {
                    grid.set(row, col, ctrl(row, ordered[i + 1]));
                } else {
                    grid.set(row, col, ctrl(row, ordered[i - 1]));
                }
            }
        }
        (_, &[row]) => {
            grid.set(row, col, format!("\\gate{{{}}}", gate_label(&gate.gate)));
        }
        _ => {}
    }
}

fn ctrl(from: usize, to: usize) -> String {
    format!("\\ctrl{{{}}}", to as isize - from as isize)
}

fn gate_label(gate: &StandardGate) -> String {
    match gate {
        StandardGate::I => "\\mathrm{Id}".to_string(),
        StandardGate::X => "X".to_string(),
        StandardGate::Y => "Y".to_string(),
        StandardGate::Z => "Z".to_string(),
        StandardGate::H => "H".to_string(),
        StandardGate::S => "S".to_string(),
        StandardGate::Sdg => "S^\\dag".to_string(),
        StandardGate::T => "T".to_string(),
        StandardGate::Tdg => "T^\\dag".to_string(),
        StandardGate::Rx(theta) => format!("R_x({})", latex_param(theta)),
        StandardGate::Ry(theta) => format!("R_y({})", latex_param(theta)),
        StandardGate::Rz(phi) => format!("R_z({})", latex_param(phi)),
        StandardGate::U1(lambda) => format!("U_1({})", latex_param(lambda)),
        StandardGate::U2(phi, lambda) => {
            format!("U_2({},{})", latex_param(phi), latex_param(lambda))
        }
        StandardGate::U3(theta, phi, lambda) => format!(
            "U_3({},{},{})",
            latex_param(theta),
            latex_param(phi),
            latex_param(lambda)
        ),
        other => other.name().to_string(),
    }
}

fn latex_param(param: &ParameterExpression) -> String {
    format!("{param}").replace("pi", "\\pi").replace('*', "")
}
