//! Introductory walkthrough: one program, one circuit, every basic gate.
//!
//! Follows the classic first-steps sequence: create registers and a
//! circuit one call at a time, rebuild the same program from specs,
//! append a fixed gate sequence, export OpenQASM, optionally render the
//! diagram, and compile for the local simulator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rimfax_compile::CompileOptions;
use rimfax_demos::{
    create_spinner, print_header, print_info, print_result, print_section, print_success,
};
use rimfax_ir::{Circuit, ClassicalRegister, InstructionKind, QuantumRegister};
use rimfax_program::{
    require_version, ApiConfig, CircuitSpec, ProgramSpecs, QuantumProgram, RegisterSpec,
};
use rimfax_viz::{render_png, RenderOptions};

/// Gate set for the rendered diagram, wide enough that the drawing keeps
/// the gates as written instead of unrolling everything to u-gates.
const DIAGRAM_BASIS: &str = "u1,u2,u3,cx,x,y,z,h,s,t,rx,ry,rz";

#[derive(Parser, Debug)]
#[command(name = "intro-program")]
#[command(about = "First steps with Rimfax: registers, gates, OpenQASM, compile")]
struct Args {
    /// Render the circuit diagram to this PNG (needs pdflatex and pdftoppm)
    #[arg(long)]
    diagram: Option<PathBuf>,

    /// Build the program from a specs file (JSON or YAML) instead of the built-in specs
    #[arg(long)]
    specs: Option<PathBuf>,

    /// Shots per experiment when compiling
    #[arg(long, default_value = "1024")]
    shots: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    print_header("Rimfax First Steps");

    // Every program starts with the same two checks: the library version
    // floor and working API credentials.
    require_version("0.4.0")?;
    let api = ApiConfig::load()?;

    print_section("Setup");
    print_result("Library version", env!("CARGO_PKG_VERSION"));
    print_result("API endpoint", &api.url);

    // Creating programs: registers and circuits, one call at a time.
    print_section("Creating Registers and Circuits");
    let mut qp = QuantumProgram::new();
    let qr = qp.create_quantum_register("qr", 2)?;
    let cr = qp.create_classical_register("cr", 2)?;
    qp.create_circuit("Circuit", &[&qr], &[&cr])?;
    print_result("Registers", format!("{qr}, {cr}"));
    print_result("Circuits", qp.circuit_names().join(", "));

    // The other option: describe the whole program up front by specs.
    // The walkthrough continues on this wider four-qubit version.
    let specs = match &args.specs {
        Some(path) => ProgramSpecs::from_file(path)?,
        None => built_in_specs(),
    };
    let mut qp = QuantumProgram::from_specs(&specs)?;
    qp.set_api(api);
    print_result("Rebuilt from specs", qp.circuit_names().join(", "));

    // Fetch the components back by name.
    let quantum_r = qp.get_quantum_register("qr")?.clone();
    let classical_r = qp.get_classical_register("cr")?.clone();

    print_section("Building the Circuit");
    let circuit = qp.get_circuit_mut("Circuit")?;
    append_walkthrough_gates(circuit, &quantum_r, &classical_r)?;

    let circuit = qp.get_circuit("Circuit")?;
    print_result("Operations", circuit.num_ops());
    print_result("Depth", circuit.depth());
    for mapping in measure_mappings(circuit) {
        print_result("Measured", mapping);
    }

    print_section("OpenQASM Export");
    let qasm_source = qp.get_qasm("Circuit")?;
    println!("{qasm_source}");

    if let Some(dest) = &args.diagram {
        print_section("Circuit Diagram");
        let options = RenderOptions {
            basis: Some(DIAGRAM_BASIS.to_string()),
            ..RenderOptions::default()
        };
        let spinner = create_spinner("Rendering with pdflatex and pdftoppm");
        let rendered = render_png(qp.get_circuit("Circuit")?, dest, &options);
        spinner.finish_and_clear();
        let path = rendered?;
        print_success(&format!("Diagram written to {}", path.display()));
    }

    print_section("Compiling for a Backend");
    print_result("Available backends", qp.available_backends().join(", "));

    let backend = "local_qasm_simulator";
    let capabilities = qp.backend_capabilities(backend)?;
    print_result(
        "Backend",
        format!("{} ({} qubits)", capabilities.name, capabilities.num_qubits),
    );

    let qobj = qp.compile_with(
        &["Circuit"],
        CompileOptions::new(backend).with_shots(args.shots),
    )?;

    let experiment = &qobj.experiments[0];
    print_result("Qobj id", &qobj.id);
    print_result("Shots", qobj.config.shots);
    print_result("Experiment", &experiment.name);
    print_result("Basis", &experiment.config.basis_gates);
    print_result("Instructions", experiment.instructions.len());

    if args.verbose {
        println!("{}", serde_json::to_string_pretty(&qobj)?);
    }

    println!();
    print_success("First steps complete!");
    print_info("Next step: submit the qobj to the backend and poll for results.");
    Ok(())
}

/// The four-qubit specs the walkthrough uses when no file is given.
fn built_in_specs() -> ProgramSpecs {
    ProgramSpecs {
        circuits: vec![CircuitSpec {
            name: "Circuit".to_string(),
            quantum_registers: vec![RegisterSpec::new("qr", 4)],
            classical_registers: vec![RegisterSpec::new("cr", 4)],
        }],
    }
}

/// Measurement mappings in the order the measures were appended.
fn measure_mappings(circuit: &Circuit) -> Vec<String> {
    circuit
        .instructions()
        .filter(|inst| matches!(inst.kind, InstructionKind::Measure))
        .filter_map(|inst| {
            let qubit = circuit.qubit(*inst.qubits.first()?)?;
            let clbit = circuit.clbit(*inst.clbits.first()?)?;
            Some(format!(
                "{}[{}] -> {}[{}]",
                qubit.register, qubit.index, clbit.register, clbit.index
            ))
        })
        .collect()
}

/// Append the fixed walkthrough sequence: every basic gate once, a
/// barrier between the blocks, and measures on the three active qubits.
fn append_walkthrough_gates(
    circuit: &mut Circuit,
    quantum_r: &QuantumRegister,
    classical_r: &ClassicalRegister,
) -> Result<()> {
    // Pauli gates.
    circuit.x(&quantum_r[1])?;
    circuit.y(&quantum_r[2])?;
    circuit.z(&quantum_r[3])?;

    // Entangle, then fence the block off.
    circuit.cx(&quantum_r[3], &quantum_r[2])?;
    circuit.barrier()?;

    // Clifford and phase gates.
    circuit.h(&quantum_r[0])?;
    circuit.s(&quantum_r[0])?;
    circuit.t(&quantum_r[1])?;
    circuit.iden(&quantum_r[1])?;

    // The physical gate family.
    circuit.u1(0.3, &quantum_r[0])?;
    circuit.u2(0.3, 0.2, &quantum_r[1])?;
    circuit.u3(0.3, 0.2, 0.1, &quantum_r[2])?;

    // Axis rotations.
    circuit.rx(0.2, &quantum_r[0])?;
    circuit.ry(0.2, &quantum_r[1])?;
    circuit.rz(0.2, &quantum_r[2])?;

    // Measure the three active qubits into their classical slots.
    circuit.measure(&quantum_r[0], &classical_r[0])?;
    circuit.measure(&quantum_r[1], &classical_r[1])?;
    circuit.measure(&quantum_r[2], &classical_r[2])?;

    Ok(())
}
