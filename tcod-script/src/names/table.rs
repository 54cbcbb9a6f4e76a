//! Static operator and standard-function tables.
//!
//! Ids are the `subOpcode` of `operator` and the `(subOpcode, parameter)` pair
//! of `callstd`. Several entries share an index with a different definition;
//! those are kept in declaration order and surfaced by
//! [`StdNames::ambiguities`](super::StdNames::ambiguities).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub name: &'static str,
    pub index: u8,
    pub operands: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub index: i32,
    /// `None` for slots that exist in the dispatch table but are not callable.
    pub params: Option<u8>,
    pub variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: &'static str,
    pub index: u8,
    pub funcs: &'static [FunctionInfo],
}

const fn op(name: &'static str, index: u8, operands: u8) -> OperatorInfo {
    OperatorInfo { name, index, operands }
}

const fn f(name: &'static str, index: i32, params: u8) -> FunctionInfo {
    FunctionInfo { name, index, params: Some(params), variadic: false }
}

const fn fv(name: &'static str, index: i32, params: u8) -> FunctionInfo {
    FunctionInfo { name, index, params: Some(params), variadic: true }
}

const fn invalid(name: &'static str, index: i32) -> FunctionInfo {
    FunctionInfo { name, index, params: None, variadic: false }
}

const fn class(name: &'static str, index: u8, funcs: &'static [FunctionInfo]) -> ClassInfo {
    ClassInfo { name, index, funcs }
}

pub static OPERATORS: &[OperatorInfo] = &[
    // unary
    op("not", 16, 1),
    op("neg", 17, 1),
    op("hex", 18, 1),
    op("str", 19, 1),
    op("int", 20, 1),
    op("float", 21, 1),
    op("getvx", 22, 1),
    op("getvy", 23, 1),
    op("getvz", 24, 1),
    op("zerofloat", 25, 1),
    // binary
    op("xor", 32, 2),
    op("or", 33, 2),
    op("and", 34, 2),
    op("add", 35, 2),
    op("sub", 36, 2),
    op("mul", 37, 2),
    op("div", 38, 2),
    op("mod", 39, 2),
    // comparison
    op("equ", 48, 2),
    op("gt", 49, 2),
    op("ge", 50, 2),
    op("lt", 51, 2),
    op("le", 52, 2),
    op("neq", 53, 2),
];

static FREE_FUNCTIONS: &[FunctionInfo] = &[
    // timers
    f("pause", 17, 1),
    f("yield", 18, 1),
    f("setTimer", 19, 1),
    f("getTimer", 20, 1),
    f("waitUntil", 21, 2),
    f("printString", 22, 1),
    // strings and bits
    f("typename", 29, 1),
    f("getCharacter", 30, 2),
    f("setCharacter", 31, 1),
    f("findSubstring", 32, 2),
    f("setBit", 33, 2),
    f("clearBit", 34, 2),
    f("mergeBits", 35, 2),
    f("nand", 36, 2),
    // math, angles in degrees
    f("sin", 48, 1),
    f("cos", 49, 1),
    f("tan", 50, 1),
    f("atan2", 51, 1),
    f("acos", 52, 1),
    f("sqrt", 53, 1),
    // single flags
    f("setFlagToTrue", 129, 1),
    f("setFlagToFalse", 130, 1),
    f("setFlag", 131, 1),
    f("checkFlag", 132, 1),
    f("getFlag", 133, 1),
    fv("printf", 136, 1),
    f("rand", 137, 0),
    f("setShadowPkmStatus", 138, 2),
    fv("checkMultiFlagsInv", 139, 1),
    fv("checkMultiFlags", 140, 1),
    // debugging
    fv("syncTaskFromLibraryScript", 142, 3),
    f("setDebugMenuVisibility", 143, 1),
    f("setPreviousMapID", 145, 1),
    f("getPreviousMapID", 146, 0),
    f("unknownFunction147", 147, 2),
    f("getPkmSpeciesName", 148, 1),
    f("unknownFunction147", 149, 1),
    f("speciesRelatedFunction148", 150, 1),
    f("getPkmRelatedArrayElement", 151, 1),
    f("unknownFunction152", 152, 1),
    f("distance", 153, 2),
    f("unknownFunction154", 154, 1),
    f("unknownFunction155", 155, 6),
    f("GCComListenerDestroy", 154, 0),
    f("unknownFunction155", 155, 5),
    f("unknownFunction156", 156, 1),
    f("getScreenResfreshRate", 157, 0),
    f("getRegion", 158, 0),
    f("getLanguage", 159, 0),
];

static VECTOR: &[FunctionInfo] = &[
    f("toString", 3, 1),
    f("clear", 16, 1),
    f("normalize", 17, 1),
    f("set", 18, 4),
    f("set2", 19, 4),
    f("fill", 20, 2),
    f("abs", 21, 1),
    f("negate", 22, 1),
    f("isZero", 23, 1),
    f("crossProduct", 24, 2),
    f("dotProduct", 25, 2),
    f("norm", 26, 1),
    f("squaredNorm", 27, 1),
    f("angle", 28, 2),
];

static ARRAY: &[FunctionInfo] = &[
    invalid("invalidFunction0", 0),
    invalid("invalidFunction1", 1),
    invalid("invalidFunction2", 2),
    f("toString", 3, 1),
    f("get", 16, 2),
    f("set", 17, 3),
    f("size", 18, 1),
    f("resize", 19, 2),
    f("extend", 20, 2),
    f("resetIterator", 22, 1),
    f("derefIterator", 23, 2),
    f("getIteratorPos", 24, 2),
    fv("append", 25, 2),
];

static CHARACTER: &[FunctionInfo] = &[
    f("setVisibility", 16, 2),
    f("displayMsgWithSpeciesSound", 21, 2),
    f("setCharacterFlags", 40, 2),
    f("clearCharacterFlags", 41, 2),
    fv("talk", 73, 2),
];

static POKEMON: &[FunctionInfo] = &[
    f("playSpecifiedSpeciesCry", 16, 2),
    f("playCry", 16, 1),
    f("getPokeballCaughtWith", 21, 1),
    f("getNickname", 22, 1),
    f("isShadow", 24, 1),
    f("getCurrentHP", 26, 1),
    f("getCurrentPurifCtr", 27, 1),
    f("getSpeciesIndex", 28, 1),
    f("isLegendary", 29, 1),
    f("getHappiness", 30, 1),
    f("getSomeSpeciesRelatedIndex", 31, 1),
    f("getHeldItem", 32, 1),
    f("getSIDTID", 33, 1),
];

static TASKS: &[FunctionInfo] = &[
    f("createSyncTaskByID", 16, 6),
    f("createSyncTaskByName", 17, 6),
    f("createAsyncTaskByID", 18, 6),
    f("createAsyncTaskByName", 19, 6),
    f("getLastReturnedInt", 20, 1),
    f("sleep", 21, 2),
];

static DIALOGS: &[FunctionInfo] = &[
    f("displatSilentMsgBox", 16, 4),
    f("displayMsgBox", 17, 5),
    f("displayYesNoQuestion", 21, 2),
    f("setMsgVar", 28, 3),
    f("promptPartyPokemon2", 32, 1),
    f("promptPartyPokemon", 33, 1),
    f("openPokemonSummary", 34, 1),
    f("promptName", 36, 2),
    f("doOpenNamePrompt", 37, 3),
    f("openPokemartMenu", 39, 2),
    f("openPADMenu", 41, 1),
    f("yesOrNoPrompt", 42, 1),
    f("openItemMenu", 50, 1),
    f("moveRelearner", 64, 2),
    f("openMoneyWindow", 67, 3),
    f("closeMoneyWindow", 68, 1),
    f("openPkCouponsWindow", 70, 3),
    f("closePkCouponsWindow", 71, 1),
];

static TRANSITION: &[FunctionInfo] = &[
    f("setup", 16, 3),
    f("checkStatus", 17, 2),
];

static PLAYER: &[FunctionInfo] = &[
    f("processEvents", 17, 1),
    f("receiveMoney", 29, 2),
    f("getMoney", 30, 1),
    f("countPartyPkm", 34, 1),
    f("countShadowPartyPkm", 35, 1),
    f("getPartyPkmNameAsStr", 36, 2),
    f("receiveGiftOrEventPkm", 37, 2),
    f("countPurifiablePartyPkm", 38, 1),
    f("healParty", 39, 1),
    f("startGroupBattle", 40, 2),
    f("countNotFaintedPartyPkm", 41, 1),
    f("getFirstInvalidPartyPkmIndex", 42, 1),
    f("countValidPartyPkm", 43, 1),
    f("getPartyPkm", 44, 2),
    f("checkPkmOwnership", 45, 2),
    f("isPCFull", 52, 1),
    f("countLegendaryPartyPkm", 53, 1),
    f("countPurfiedPkm", 59, 1),
    f("awardMtBattleRibbons", 60, 1),
    f("getPkCoupons", 61, 1),
    f("setPkCoupons", 62, 2),
    f("receivePkCoupons", 63, 2),
    f("countShadowPkm", 64, 1),
    f("isSpeciesInPC", 68, 2),
    f("releasePartyPkm", 69, 2),
];

static DAYCARE: &[FunctionInfo] = &[
    f("getLevelsGained", 17, 1),
    f("getNbOfHundredsOfShadowCtrLost", 18, 1),
    f("depositPkm", 19, 2),
    f("withdrawPkm", 20, 2),
    f("calculateCost", 21, 2),
    f("checkDaycareStatus", 22, 1),
    f("getPkm", 22, 1),
];

static TASK_MANAGER: &[FunctionInfo] = &[
    f("allocateTask", 16, 2),
    f("zeroFunction17", 17, 1),
    f("getTaskCounter", 18, 1),
    f("stopTask", 19, 2),
    f("unknownFunction20", 20, 2),
    f("unknownFunction21", 21, 2),
    f("unknownFunction22", 22, 3),
    f("unknownFunction23", 23, 3),
];

static SHADOW_POKEMONS: &[FunctionInfo] = &[
    f("isShadowPkmPurified", 16, 2),
    f("isShadowPkmCaught", 17, 2),
    f("setShadowPkmStatus", 18, 3),
    f("getShadowPkmSpecies", 19, 2),
    f("getShadowPkmStatus", 20, 2),
    f("unknownFunction21", 21, 2),
    f("setShadowPkmStorageUnit", 22, 4),
];

/// Class 0 is not a real class: its functions take no receiver.
pub static CLASSES: &[ClassInfo] = &[
    class("", 0, FREE_FUNCTIONS),
    class("Vector", 4, VECTOR),
    class("Array", 7, ARRAY),
    class("UnknownClass33", 33, &[]),
    class("Character", 35, CHARACTER),
    class("Pokemon", 37, POKEMON),
    class("UnknownClass38", 38, &[]),
    class("Tasks", 39, TASKS),
    class("Dialogs", 40, DIALOGS),
    class("Transition", 41, TRANSITION),
    class("UnknownClass42", 42, &[]),
    class("Player", 43, PLAYER),
    class("UnknownClass44", 44, &[]),
    class("UnknownClass45", 45, &[]),
    class("UnknownClass46", 46, &[]),
    class("Sound", 47, &[]),
    class("UnknownClass48", 48, &[]),
    class("UnknownClass49", 49, &[]),
    class("UnknownClass50", 50, &[]),
    class("UnknownClass51", 51, &[]),
    class("Daycare", 52, DAYCARE),
    class("TaskManager", 54, TASK_MANAGER),
    class("UnknownClass58", 58, &[]),
    class("ShadowPokemons", 59, SHADOW_POKEMONS),
    class("UnknownClass60", 60, &[]),
];
