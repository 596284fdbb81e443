pub mod configuration;

pub mod concurrent {
    pub mod synchronizedtabulatedfunction;
    pub mod tasks;
}

pub mod function {
    pub mod point;
    pub mod mathfunction;
    pub mod elementaryfunction;
    pub mod tabulatedfunctionerror;
    pub mod tabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod linkedlisttabulatedfunction;

    pub mod factory {
        pub mod tabulatedfunctionfactory;
        pub mod arraytabulatedfunctionfactory;
        pub mod linkedlisttabulatedfunctionfactory;
    }
}

pub mod io {
    pub mod functionsio;
}

pub mod operations {
    pub mod tabulateddifferentialoperator;
    pub mod steppingdifferentialoperator;
    pub mod tabulatedfunctionoperationservice;
}
